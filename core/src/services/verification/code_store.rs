//! Code generation, issuance and verification backed by a key-value store

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use ev_shared::email::mask_email;
use rand::{rngs::OsRng, Rng};

use crate::domain::entities::VerificationRecord;
use crate::errors::StoreError;
use crate::repositories::KeyValueStore;
use crate::services::clock::{Clock, SystemClock};

use super::config::CodeStoreConfig;
use super::types::VerifyOutcome;

/// Issues and verifies one-time codes keyed by identity
///
/// All state lives in the key-value store: one verification record per
/// identity under the configured code prefix and one rate window under the
/// rate limit prefix. Every operation is a short read-modify-write sequence
/// without cross-call atomicity.
pub struct CodeStore<S: KeyValueStore, C: Clock = SystemClock> {
    pub(super) store: Arc<S>,
    pub(super) clock: Arc<C>,
    pub(super) config: CodeStoreConfig,
}

impl<S: KeyValueStore> CodeStore<S, SystemClock> {
    /// Create a code store reading the wall clock
    pub fn new(store: Arc<S>, config: CodeStoreConfig) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }
}

impl<S: KeyValueStore, C: Clock> CodeStore<S, C> {
    /// Create a code store with an explicit time source
    pub fn with_clock(store: Arc<S>, clock: Arc<C>, config: CodeStoreConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &CodeStoreConfig {
        &self.config
    }

    /// Generate a code of `length` decimal digits, uniform per digit
    pub fn generate(length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Generate a code of the configured length
    pub fn generate_default(&self) -> String {
        Self::generate(self.config.verification.code_length)
    }

    /// Store `code` for `identity` with the configured lifetime
    ///
    /// Returns `false` only when the store write fails.
    pub async fn issue(&self, identity: &str, code: &str) -> bool {
        self.issue_with_ttl(identity, code, self.config.verification.code_ttl_seconds)
            .await
    }

    /// Store `code` for `identity`, valid for `ttl_seconds`
    pub async fn issue_with_ttl(&self, identity: &str, code: &str, ttl_seconds: u64) -> bool {
        match self.try_issue(identity, code, ttl_seconds).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    identity = %mask_email(identity),
                    error = %e,
                    event = "code_store_failed",
                    "Failed to store verification code"
                );
                false
            }
        }
    }

    /// Write the verification record, replacing any previous one
    pub async fn try_issue(
        &self,
        identity: &str,
        code: &str,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let record = VerificationRecord::new(code, self.clock.now(), ttl_seconds);
        let value = record
            .encode()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.store.set(&self.config.code_key(identity), &value).await?;

        tracing::info!(
            identity = %mask_email(identity),
            expires_at = record.expires_at,
            event = "code_stored",
            "Verification code stored"
        );
        Ok(())
    }

    /// Check `submitted` against the stored code for `identity`
    ///
    /// A match consumes the record. Store failures deny verification.
    pub async fn verify(&self, identity: &str, submitted: &str) -> bool {
        match self.try_verify(identity, submitted).await {
            Ok(outcome) => outcome.is_verified(),
            Err(e) => {
                tracing::error!(
                    identity = %mask_email(identity),
                    error = %e,
                    event = "verify_store_error",
                    "Store error while verifying code"
                );
                false
            }
        }
    }

    /// Verify and report why a code was or was not accepted
    pub async fn try_verify(
        &self,
        identity: &str,
        submitted: &str,
    ) -> Result<VerifyOutcome, StoreError> {
        let key = self.config.code_key(identity);
        let masked = mask_email(identity);

        let record = match self.load_record(&key, &masked).await? {
            StoredCode::Live(record) => record,
            StoredCode::Missing => return Ok(VerifyOutcome::Missing),
            StoredCode::Corrupt => return Ok(VerifyOutcome::Corrupt),
            StoredCode::Expired => return Ok(VerifyOutcome::Expired),
        };

        if !constant_time_eq(record.code.as_bytes(), submitted.as_bytes()) {
            tracing::info!(identity = %masked, event = "code_mismatch", "Verification code mismatch");
            return Ok(VerifyOutcome::Mismatch);
        }

        self.store.delete(&key).await?;
        tracing::info!(identity = %masked, event = "code_verified", "Verification code accepted");
        Ok(VerifyOutcome::Verified)
    }

    /// Stored code for `identity` if present and unexpired
    ///
    /// Diagnostic accessor; applies the same lazy expiry as `verify`.
    pub async fn peek(&self, identity: &str) -> Option<String> {
        match self.try_peek(identity).await {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(
                    identity = %mask_email(identity),
                    error = %e,
                    event = "verify_store_error",
                    "Store error while reading verification code"
                );
                None
            }
        }
    }

    pub async fn try_peek(&self, identity: &str) -> Result<Option<String>, StoreError> {
        let key = self.config.code_key(identity);

        match self.load_record(&key, &mask_email(identity)).await? {
            StoredCode::Live(record) => Ok(Some(record.code)),
            StoredCode::Missing | StoredCode::Corrupt | StoredCode::Expired => Ok(None),
        }
    }

    /// Read and decode the record under `key`, deleting it if expired
    async fn load_record(&self, key: &str, masked: &str) -> Result<StoredCode, StoreError> {
        let raw = match self.store.get(key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                tracing::info!(identity = %masked, event = "code_missing", "No verification code found");
                return Ok(StoredCode::Missing);
            }
        };

        let record = match VerificationRecord::decode(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    identity = %masked,
                    error = %e,
                    event = "code_corrupt",
                    "Stored verification code is unreadable"
                );
                return Ok(StoredCode::Corrupt);
            }
        };

        let now = self.clock.now();
        if record.is_expired(now) {
            self.store.delete(key).await?;
            tracing::info!(
                identity = %masked,
                expires_at = record.expires_at,
                now = now,
                event = "code_expired",
                "Verification code expired"
            );
            return Ok(StoredCode::Expired);
        }

        Ok(StoredCode::Live(record))
    }
}

// State of the stored record after lazy expiry
enum StoredCode {
    Missing,
    Corrupt,
    Expired,
    Live(VerificationRecord),
}
