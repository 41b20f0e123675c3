//! Shared utilities and common types for the email verification services
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types (cache, SMTP, verification, rate limiting, logging)
//! - Utility functions (email masking and validation)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, Environment, LogFormat, LoggingConfig,
    RateLimitConfig, SmtpConfig, VerificationConfig,
};
pub use utils::email;
