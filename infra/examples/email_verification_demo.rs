//! Email verification demo
//!
//! Runs the request, send, store and verify flow against an in-memory store
//! and the mock transport.
//! Run with: cargo run -p ev_infra --example email_verification_demo

use std::sync::Arc;

use ev_core::repositories::InMemoryStore;
use ev_core::services::verification::{CodeStore, RequestCodeOutcome};
use ev_infra::logging::init_tracing;
use ev_infra::mail::MockEmailTransport;
use ev_infra::EmailVerificationServices;
use ev_shared::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::default();
    config.smtp.sender_name = "Demo Accounts".to_string();
    config.rate_limit.max_requests = 3;
    init_tracing(&LoggingConfig::for_environment(config.environment));

    println!("=== Email Verification Demo ===\n");

    let store = Arc::new(InMemoryStore::new());
    let transport = Arc::new(MockEmailTransport::new());
    let services = EmailVerificationServices::assemble(store.clone(), transport.clone(), &config);
    let identity = "user@example.com";

    // Step by step
    let (allowed, retry_after) = services.code_store.can_issue(identity).await;
    println!("can_issue -> ({}, {})", allowed, retry_after);

    let code = CodeStore::<InMemoryStore>::generate(config.verification.code_length);
    println!("generate -> {}", code);

    let sent = services.notifier.send_verification_code(identity, &code).await;
    println!("send_verification_code -> {}", sent);

    let stored = services.code_store.issue(identity, &code).await;
    println!("issue -> {}", stored);

    println!("verify (first)  -> {}", services.code_store.verify(identity, &code).await);
    println!("verify (second) -> {}", services.code_store.verify(identity, &code).await);

    // Through the workflow until the limit is reached
    println!("\n--- Workflow ---");
    loop {
        match services.workflow.request_code(identity).await {
            RequestCodeOutcome::Sent => {
                let email = transport
                    .last_email_to(identity)
                    .ok_or_else(|| anyhow::anyhow!("no email recorded"))?;
                println!("request_code -> sent ({})", email.message_id);
            }
            RequestCodeOutcome::RateLimited {
                retry_after_seconds,
            } => {
                println!("request_code -> rate limited, retry in {}s", retry_after_seconds);
                break;
            }
            other => anyhow::bail!("unexpected outcome: {:?}", other),
        }
    }

    println!("\nEmails recorded: {}", transport.message_count());
    println!("Keys in store: {}", store.len().await);

    Ok(())
}
