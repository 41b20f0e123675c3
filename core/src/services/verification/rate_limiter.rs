//! Per-identity issuance rate limiting over a fixed window

use ev_shared::email::mask_email;

use crate::domain::entities::{RateWindow, RateWindowEncoding};
use crate::errors::StoreError;
use crate::repositories::KeyValueStore;
use crate::services::clock::Clock;

use super::code_store::CodeStore;
use super::types::RateLimitStatus;

impl<S: KeyValueStore, C: Clock> CodeStore<S, C> {
    /// Whether a new code may be issued to `identity`
    ///
    /// # Returns
    ///
    /// * `(true, 0)` if allowed, `(false, retry_after_seconds)` otherwise
    pub async fn can_issue(&self, identity: &str) -> (bool, u64) {
        self.check_rate_limit(identity).await.as_tuple()
    }

    /// Count an issuance request against the window of `identity`
    ///
    /// Store failures allow the request so that an outage does not block
    /// legitimate senders.
    pub async fn check_rate_limit(&self, identity: &str) -> RateLimitStatus {
        match self.try_check_rate_limit(identity).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(
                    identity = %mask_email(identity),
                    error = %e,
                    event = "rate_limit_store_error",
                    "Store error while checking rate limit, allowing request"
                );
                RateLimitStatus::Allowed
            }
        }
    }

    /// Rate check that surfaces store failures
    ///
    /// 1. No window stored: open one holding this request
    /// 2. Legacy counter: rewrite it as a window before continuing
    /// 3. Window elapsed: reset it to hold this request
    /// 4. Limit reached: refuse until the window closes
    /// 5. Otherwise: count this request
    pub async fn try_check_rate_limit(&self, identity: &str) -> Result<RateLimitStatus, StoreError> {
        let limits = &self.config.rate_limit;
        if !limits.enabled {
            return Ok(RateLimitStatus::Allowed);
        }

        let key = self.config.rate_key(identity);
        let masked = mask_email(identity);
        let now = self.clock.now();

        let raw = match self.store.get(&key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                let window = RateWindow::open(now, limits.window_seconds);
                self.write_window(&key, &window).await?;
                tracing::debug!(
                    identity = %masked,
                    expires_at = window.expires_at,
                    event = "rate_window_opened",
                    "Rate window opened"
                );
                return Ok(RateLimitStatus::Allowed);
            }
        };

        let mut window = match RateWindowEncoding::decode(&raw, now, limits.window_seconds) {
            Ok(encoding) => {
                let migrate = encoding.needs_migration();
                let window = encoding.into_window();
                if migrate {
                    self.write_window(&key, &window).await?;
                    tracing::info!(
                        identity = %masked,
                        count = window.count,
                        event = "rate_window_migrated",
                        "Legacy rate counter migrated"
                    );
                }
                window
            }
            Err(e) => {
                let window = RateWindow::open(now, limits.window_seconds);
                self.write_window(&key, &window).await?;
                tracing::warn!(
                    identity = %masked,
                    error = %e,
                    event = "rate_window_corrupt",
                    "Unreadable rate window replaced"
                );
                return Ok(RateLimitStatus::Allowed);
            }
        };

        if window.is_elapsed(now) {
            let fresh = RateWindow::open(now, limits.window_seconds);
            self.write_window(&key, &fresh).await?;
            tracing::debug!(
                identity = %masked,
                previous_count = window.count,
                event = "rate_window_reset",
                "Rate window reset"
            );
            return Ok(RateLimitStatus::Allowed);
        }

        if window.is_exhausted(limits.max_requests) {
            let retry_after_seconds = window.retry_after(now);
            tracing::warn!(
                identity = %masked,
                count = window.count,
                limit = limits.max_requests,
                retry_after_seconds = retry_after_seconds,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Ok(RateLimitStatus::Exceeded {
                retry_after_seconds,
            });
        }

        window.increment();
        self.write_window(&key, &window).await?;
        tracing::debug!(
            identity = %masked,
            count = window.count,
            event = "rate_window_incremented",
            "Rate window incremented"
        );
        Ok(RateLimitStatus::Allowed)
    }

    async fn write_window(&self, key: &str, window: &RateWindow) -> Result<(), StoreError> {
        let value = window
            .encode()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(key, &value).await
    }
}
