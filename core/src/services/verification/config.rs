//! Configuration for the code store

use ev_shared::{RateLimitConfig, VerificationConfig};

/// Settings for code issuance and issuance rate limiting
#[derive(Debug, Clone, Default)]
pub struct CodeStoreConfig {
    /// Code length, lifetime and record key prefix
    pub verification: VerificationConfig,
    /// Issuance limit, window length and window key prefix
    pub rate_limit: RateLimitConfig,
}

impl CodeStoreConfig {
    pub fn new(verification: VerificationConfig, rate_limit: RateLimitConfig) -> Self {
        Self {
            verification,
            rate_limit,
        }
    }

    /// Store key of the verification record for `identity`
    pub fn code_key(&self, identity: &str) -> String {
        format!("{}{}", self.verification.key_prefix, identity)
    }

    /// Store key of the rate window for `identity`
    pub fn rate_key(&self, identity: &str) -> String {
        format!("{}{}", self.rate_limit.key_prefix, identity)
    }
}
