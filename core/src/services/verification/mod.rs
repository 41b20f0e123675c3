//! Email verification module
//!
//! This module provides the verification code workflow:
//! - Code generation from the OS random source
//! - Issuance and lazy-expiry verification against a key-value store
//! - Per-identity fixed window rate limiting of issuance
//! - Orchestration of rate check, delivery and storage

mod code_store;
mod config;
mod rate_limiter;
mod types;
mod workflow;

#[cfg(test)]
mod tests;

pub use code_store::CodeStore;
pub use config::CodeStoreConfig;
pub use types::{RateLimitStatus, RequestCodeOutcome, VerifyOutcome};
pub use workflow::VerificationWorkflow;
