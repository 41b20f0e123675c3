//! Verification record stored per identity under `email_verification:<identity>`.

use serde::{Deserialize, Serialize};

use super::expires_after;
use crate::errors::RecordError;

/// Default length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (10 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 600;

/// A live verification code and the Unix timestamp after which it is void
///
/// The store never expires entries on its own; expiry is decided by
/// comparing `expires_at` with the current time whenever the record is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// The issued code, digits only
    pub code: String,

    /// Absolute Unix timestamp (seconds) marking the end of validity
    #[serde(default)]
    pub expires_at: i64,
}

impl VerificationRecord {
    /// Create a record valid for `ttl_seconds` from `now`
    pub fn new(code: impl Into<String>, now: i64, ttl_seconds: u64) -> Self {
        Self {
            code: code.into(),
            expires_at: expires_after(now, ttl_seconds),
        }
    }

    /// A record is expired once `now` is strictly past `expires_at`
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Decode a stored JSON value
    pub fn decode(raw: &str) -> Result<Self, RecordError> {
        let record: Self = serde_json::from_str(raw)
            .map_err(|e| RecordError::Corrupt(format!("verification record: {}", e)))?;
        if record.code.is_empty() {
            return Err(RecordError::Corrupt(
                "verification record: empty code".to_string(),
            ));
        }
        Ok(record)
    }

    /// Encode for storage
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
