//! Configuration module with concern-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection and retry configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Issuance rate limiting per identity
//! - `smtp` - Outbound email delivery
//! - `verification` - Code length, lifetime and key layout

pub mod cache;
pub mod environment;
pub mod rate_limit;
pub mod smtp;
pub mod verification;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use smtp::SmtpConfig;
pub use verification::VerificationConfig;

/// Invalid configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// SMTP configuration
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            cache: CacheConfig::from_env(),
            smtp: SmtpConfig::from_env(),
            verification: VerificationConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check values that would make the services misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verification.code_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "verification.code_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.verification.code_ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "verification.code_ttl_seconds",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit.max_requests",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit.window_seconds",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
