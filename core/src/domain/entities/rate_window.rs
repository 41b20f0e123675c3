//! Issuance rate window stored per identity under `email_verification_limit:<identity>`.

use serde::{Deserialize, Serialize};

use super::expires_after;
use crate::errors::RecordError;

/// Default number of codes an identity may request per window
pub const DEFAULT_RATE_LIMIT: u32 = 5;

/// Default window length (1 hour)
pub const DEFAULT_WINDOW_SECONDS: u64 = 3600;

/// Issuance counter for the current fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    /// Codes issued in the current window
    #[serde(default)]
    pub count: u32,

    /// Absolute Unix timestamp (seconds) marking the end of the window
    #[serde(default)]
    pub expires_at: i64,
}

impl RateWindow {
    /// Open a new window at `now` holding the request that opened it
    pub fn open(now: i64, window_seconds: u64) -> Self {
        Self {
            count: 1,
            expires_at: expires_after(now, window_seconds),
        }
    }

    /// A window has elapsed once `now` is strictly past `expires_at`
    pub fn is_elapsed(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Whether no further request fits in this window
    pub fn is_exhausted(&self, limit: u32) -> bool {
        self.count >= limit
    }

    /// Seconds until the window closes, floored at zero
    pub fn retry_after(&self, now: i64) -> u64 {
        u64::try_from(self.expires_at.saturating_sub(now)).unwrap_or(0)
    }

    /// Record one more issued code
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Encode for storage
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The two shapes a stored rate window can take
///
/// Counters written by the earlier scheme are a bare decimal integer with no
/// window bound. Decoding tries the structured JSON record first and falls
/// back to the scalar form; callers normalize a `Legacy` value by persisting
/// the canonical record before using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateWindowEncoding {
    /// Canonical `{count, expires_at}` JSON record
    Structured(RateWindow),
    /// Bare integer counter, already normalized with a window starting at decode time
    Legacy(RateWindow),
}

impl RateWindowEncoding {
    /// Decode a stored value, normalizing the legacy scalar form
    pub fn decode(raw: &str, now: i64, window_seconds: u64) -> Result<Self, RecordError> {
        if let Ok(window) = serde_json::from_str::<RateWindow>(raw) {
            return Ok(Self::Structured(window));
        }

        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let count = trimmed
                .parse::<u32>()
                .map_err(|e| RecordError::Corrupt(format!("legacy rate counter: {}", e)))?;
            return Ok(Self::Legacy(RateWindow {
                count,
                expires_at: expires_after(now, window_seconds),
            }));
        }

        Err(RecordError::Corrupt(format!(
            "rate window: unrecognized value of {} bytes",
            raw.len()
        )))
    }

    /// Whether the stored value must be rewritten in canonical form
    pub fn needs_migration(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// The canonical window regardless of the stored shape
    pub fn into_window(self) -> RateWindow {
        match self {
            Self::Structured(window) | Self::Legacy(window) => window,
        }
    }
}
