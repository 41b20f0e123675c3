//! Orchestration of the request and confirm steps

use std::sync::Arc;

use crate::repositories::KeyValueStore;
use crate::services::clock::{Clock, SystemClock};
use crate::services::notification::{EmailTransport, Notifier};

use super::code_store::CodeStore;
use super::types::{RateLimitStatus, RequestCodeOutcome};

/// Runs rate check, generation, delivery and storage in order
pub struct VerificationWorkflow<S: KeyValueStore, T: EmailTransport, C: Clock = SystemClock> {
    code_store: Arc<CodeStore<S, C>>,
    notifier: Arc<Notifier<T>>,
}

impl<S: KeyValueStore, T: EmailTransport, C: Clock> VerificationWorkflow<S, T, C> {
    pub fn new(code_store: Arc<CodeStore<S, C>>, notifier: Arc<Notifier<T>>) -> Self {
        Self {
            code_store,
            notifier,
        }
    }

    pub fn code_store(&self) -> &Arc<CodeStore<S, C>> {
        &self.code_store
    }

    pub fn notifier(&self) -> &Arc<Notifier<T>> {
        &self.notifier
    }

    /// Send a fresh code to `identity` and store it
    ///
    /// The code is stored only after the email was accepted, so a failed
    /// delivery leaves any previous code in place.
    pub async fn request_code(&self, identity: &str) -> RequestCodeOutcome {
        if let RateLimitStatus::Exceeded {
            retry_after_seconds,
        } = self.code_store.check_rate_limit(identity).await
        {
            return RequestCodeOutcome::RateLimited {
                retry_after_seconds,
            };
        }

        let code = self.code_store.generate_default();

        if !self.notifier.send_verification_code(identity, &code).await {
            return RequestCodeOutcome::DeliveryFailed;
        }

        if !self.code_store.issue(identity, &code).await {
            return RequestCodeOutcome::StorageFailed;
        }

        RequestCodeOutcome::Sent
    }

    /// Check a submitted code, consuming it on success
    pub async fn confirm_code(&self, identity: &str, code: &str) -> bool {
        self.code_store.verify(identity, code).await
    }
}
