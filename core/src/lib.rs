//! # Email Verification Core
//!
//! Core logic for email-based one-time verification codes.
//! This crate contains the stored record types, the store and transport
//! ports, the code store (issuance, verification, rate limiting) and the
//! notifier that formats verification emails.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
