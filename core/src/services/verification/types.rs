//! Types for verification results

/// Outcome of checking a submitted code against the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the record has been consumed
    Verified,
    /// Code did not match; the record is left for another attempt
    Mismatch,
    /// Record was past its expiry and has been removed
    Expired,
    /// No record is stored for the identity
    Missing,
    /// The stored value could not be decoded
    Corrupt,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }
}

/// Result of an issuance rate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    Allowed,
    /// Limit reached; the caller must wait for the window to close
    Exceeded { retry_after_seconds: u64 },
}

impl RateLimitStatus {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitStatus::Allowed)
    }

    /// Seconds until issuance is possible again, zero when allowed
    pub fn retry_after_seconds(&self) -> u64 {
        match self {
            RateLimitStatus::Allowed => 0,
            RateLimitStatus::Exceeded {
                retry_after_seconds,
            } => *retry_after_seconds,
        }
    }

    /// `(allowed, retry_after_seconds)` pair
    pub fn as_tuple(&self) -> (bool, u64) {
        (self.is_allowed(), self.retry_after_seconds())
    }
}

/// Result of requesting a new code for an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCodeOutcome {
    /// Code delivered and stored
    Sent,
    /// Issuance refused by the rate limit
    RateLimited { retry_after_seconds: u64 },
    /// The email could not be delivered; nothing was stored
    DeliveryFailed,
    /// The email was delivered but the code could not be stored
    StorageFailed,
}

impl RequestCodeOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, RequestCodeOutcome::Sent)
    }
}
