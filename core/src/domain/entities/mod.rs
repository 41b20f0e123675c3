//! Stored records keyed by recipient identity.

pub mod rate_window;
pub mod verification_record;

#[cfg(test)]
mod tests;

/// Absolute expiry `seconds` after `now`, saturating at `i64::MAX`
pub(crate) fn expires_after(now: i64, seconds: u64) -> i64 {
    now.saturating_add(i64::try_from(seconds).unwrap_or(i64::MAX))
}

// Re-export commonly used types
pub use rate_window::{RateWindow, RateWindowEncoding, DEFAULT_RATE_LIMIT, DEFAULT_WINDOW_SECONDS};
pub use verification_record::{VerificationRecord, CODE_LENGTH, DEFAULT_CODE_TTL_SECONDS};
