//! Unit tests for the verification workflow

use std::sync::Arc;

use crate::repositories::InMemoryStore;
use crate::services::clock::MockClock;
use crate::services::notification::{Notifier, NotifierConfig};
use crate::services::verification::{
    CodeStore, CodeStoreConfig, RequestCodeOutcome, VerificationWorkflow,
};

use super::mocks::{config_with_limit, StubTransport, IDENTITY, START};

struct Harness {
    store: Arc<InMemoryStore>,
    transport: Arc<StubTransport>,
    workflow: VerificationWorkflow<InMemoryStore, StubTransport, MockClock>,
}

fn harness(accept: bool, config: CodeStoreConfig) -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let transport = Arc::new(StubTransport::new(accept));
    let codes = Arc::new(CodeStore::with_clock(
        store.clone(),
        Arc::new(MockClock::new(START)),
        config,
    ));
    let notifier = Arc::new(Notifier::new(transport.clone(), NotifierConfig::new("Acme", 10)));
    Harness {
        store,
        transport,
        workflow: VerificationWorkflow::new(codes, notifier),
    }
}

#[tokio::test]
async fn test_request_then_confirm() {
    let h = harness(true, CodeStoreConfig::default());

    assert_eq!(h.workflow.request_code(IDENTITY).await, RequestCodeOutcome::Sent);
    assert_eq!(h.transport.sent_count(), 1);

    let code = h.workflow.code_store().peek(IDENTITY).await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(h.transport.sent.lock().unwrap()[0].html_body.contains(&code));

    assert!(h.workflow.confirm_code(IDENTITY, &code).await);
    assert!(!h.workflow.confirm_code(IDENTITY, &code).await);
}

#[tokio::test]
async fn test_rate_limited_request_sends_nothing() {
    let h = harness(true, config_with_limit(1, 3600));

    assert!(h.workflow.request_code(IDENTITY).await.is_sent());
    assert_eq!(
        h.workflow.request_code(IDENTITY).await,
        RequestCodeOutcome::RateLimited {
            retry_after_seconds: 3600
        }
    );
    assert_eq!(h.transport.sent_count(), 1);
}

#[tokio::test]
async fn test_delivery_failure_stores_nothing() {
    let h = harness(false, CodeStoreConfig::default());

    assert_eq!(
        h.workflow.request_code(IDENTITY).await,
        RequestCodeOutcome::DeliveryFailed
    );
    assert_eq!(
        h.store.raw_get("email_verification:user@example.com").await,
        None
    );
}

#[tokio::test]
async fn test_storage_failure_after_delivery() {
    let h = harness(true, CodeStoreConfig::default());
    h.store.fail_writes(true);

    assert_eq!(
        h.workflow.request_code(IDENTITY).await,
        RequestCodeOutcome::StorageFailed
    );
    assert_eq!(h.transport.sent_count(), 1);
}
