//! Mock Email Transport Implementation
//!
//! Records messages in memory instead of sending them, for development
//! and testing. Failures of each transport class can be simulated.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use ev_core::errors::MailError;
use ev_core::services::notification::{EmailTransport, OutgoingEmail};
use ev_shared::email::{is_valid_email, mask_email};

/// A message accepted by the mock transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub message_id: String,
    pub to: String,
    pub cc: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Failure class the mock transport should report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFailure {
    MissingConfig,
    Authentication,
    Connection,
    Transport,
}

impl SimulatedFailure {
    fn to_error(self) -> MailError {
        match self {
            SimulatedFailure::MissingConfig => {
                MailError::MissingConfig(vec!["server".to_string(), "password".to_string()])
            }
            SimulatedFailure::Authentication => {
                MailError::Authentication("535 simulated authentication failure".to_string())
            }
            SimulatedFailure::Connection => {
                MailError::Connection("simulated connection refused".to_string())
            }
            SimulatedFailure::Transport => {
                MailError::Transport("554 simulated transaction failure".to_string())
            }
        }
    }
}

/// Mock email transport for development and testing
///
/// This implementation:
/// - Validates recipient addresses
/// - Generates mock message ids
/// - Keeps every accepted message for inspection
/// - Simulates a configured failure class
#[derive(Clone, Default)]
pub struct MockEmailTransport {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failure: Arc<Mutex<Option<SimulatedFailure>>>,
}

impl MockEmailTransport {
    /// Create a new mock transport accepting every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport failing every send with `failure`
    pub fn failing(failure: SimulatedFailure) -> Self {
        let transport = Self::new();
        transport.set_failure(Some(failure));
        transport
    }

    /// Enable or disable failure simulation
    pub fn set_failure(&self, failure: Option<SimulatedFailure>) {
        *lock(&self.failure) = failure;
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Every accepted message, oldest first
    pub fn sent_emails(&self) -> Vec<SentEmail> {
        lock(&self.sent).clone()
    }

    /// Most recent message addressed to `to`
    pub fn last_email_to(&self, to: &str) -> Option<SentEmail> {
        lock(&self.sent).iter().rev().find(|e| e.to == to).cloned()
    }

    /// Forget recorded messages and reset the counter
    pub fn reset(&self) {
        lock(&self.sent).clear();
        self.message_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmailTransport for MockEmailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        if let Some(address) = email.recipients().find(|a| !is_valid_email(a)) {
            return Err(MailError::InvalidAddress(address.to_string()));
        }

        if let Some(failure) = *lock(&self.failure) {
            warn!(
                provider = "mock",
                to = %mask_email(&email.to),
                failure = ?failure,
                "Mock email transport simulating failure"
            );
            return Err(failure.to_error());
        }

        let message_id = format!("<mock-{}@localhost>", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        lock(&self.sent).push(SentEmail {
            message_id: message_id.clone(),
            to: email.to.clone(),
            cc: email.cc.clone(),
            subject: email.subject.clone(),
            html_body: email.html_body.clone(),
        });

        info!(
            provider = "mock",
            to = %mask_email(&email.to),
            cc = email.cc.len(),
            message_id = %message_id,
            count = count,
            "Mock email recorded"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
