//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Per-identity limit on verification code issuance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max codes issued per identity within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Store key prefix for rate windows
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("VERIFICATION_RATE_LIMIT_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_enabled),
            max_requests: std::env::var("VERIFICATION_RATE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_requests),
            window_seconds: std::env::var("VERIFICATION_RATE_WINDOW_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_window_seconds),
            key_prefix: default_key_prefix(),
        }
    }

    /// Create a disabled configuration (every request allowed)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_seconds() -> u64 {
    3600 // 1 hour
}

fn default_key_prefix() -> String {
    String::from("email_verification_limit:")
}
