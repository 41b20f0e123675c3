//! Verification code configuration module

use serde::{Deserialize, Serialize};

/// Verification code issuance settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a stored code stays valid
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,

    /// Store key prefix for code records
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_ttl_seconds: default_code_ttl_seconds(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_length: std::env::var("VERIFICATION_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_code_length),
            code_ttl_seconds: std::env::var("VERIFICATION_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_code_ttl_seconds),
            key_prefix: default_key_prefix(),
        }
    }

    /// Code validity expressed in whole minutes (rounded up), for email copy
    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl_seconds.div_ceil(60)
    }
}

fn default_code_length() -> usize {
    6
}

fn default_code_ttl_seconds() -> u64 {
    600 // 10 minutes
}

fn default_key_prefix() -> String {
    String::from("email_verification:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.code_ttl_seconds, 600);
        assert_eq!(config.key_prefix, "email_verification:");
        assert_eq!(config.code_ttl_minutes(), 10);
    }

    #[test]
    fn test_ttl_minutes_rounds_up() {
        let config = VerificationConfig {
            code_ttl_seconds: 90,
            ..Default::default()
        };
        assert_eq!(config.code_ttl_minutes(), 2);
    }
}
