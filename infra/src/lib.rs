//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `ev_core`:
//! - **Cache**: Redis client backing the verification records and rate windows
//! - **Mail**: SMTP delivery via `lettre` and a recording mock transport
//! - **Logging**: `tracing-subscriber` initialisation
//!
//! [`build_services`] wires them from an [`AppConfig`].

use std::sync::Arc;

use ev_core::repositories::KeyValueStore;
use ev_core::services::notification::{EmailTransport, Notifier, NotifierConfig};
use ev_core::services::verification::{CodeStore, CodeStoreConfig, VerificationWorkflow};
use ev_shared::{AppConfig, Environment};

// Re-export core types for convenience
pub use ev_core::errors::*;

/// Cache module - Redis client and store adapter
pub mod cache;

/// Logging initialisation
pub mod logging;

/// Mail module - SMTP and mock transports
pub mod mail;

use cache::RedisClient;
use mail::SmtpEmailTransport;

/// Verification services sharing one store and one transport
pub struct EmailVerificationServices<S: KeyValueStore = RedisClient, T: EmailTransport = SmtpEmailTransport> {
    pub code_store: Arc<CodeStore<S>>,
    pub notifier: Arc<Notifier<T>>,
    pub workflow: Arc<VerificationWorkflow<S, T>>,
}

impl<S: KeyValueStore, T: EmailTransport> EmailVerificationServices<S, T> {
    /// Assemble the services around an existing store and transport
    pub fn assemble(store: Arc<S>, transport: Arc<T>, config: &AppConfig) -> Self {
        let code_store = Arc::new(CodeStore::new(
            store,
            CodeStoreConfig::new(config.verification.clone(), config.rate_limit.clone()),
        ));
        let notifier = Arc::new(Notifier::new(
            transport,
            NotifierConfig::new(
                config.smtp.sender_name.clone(),
                config.verification.code_ttl_minutes(),
            ),
        ));
        let workflow = Arc::new(VerificationWorkflow::new(
            code_store.clone(),
            notifier.clone(),
        ));

        Self {
            code_store,
            notifier,
            workflow,
        }
    }
}

/// Connect to Redis and build the SMTP-backed verification services
///
/// An incomplete SMTP configuration does not fail here; sends then report
/// the missing settings.
pub async fn build_services(
    config: &AppConfig,
) -> Result<EmailVerificationServices, InfrastructureError> {
    config
        .validate()
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    tracing::info!(
        environment = %config.environment,
        rate_limit_enabled = config.rate_limit.enabled,
        smtp_complete = config.smtp.is_complete(),
        "Initializing email verification services"
    );

    let store = Arc::new(RedisClient::new(config.cache.clone()).await?);
    let transport = Arc::new(SmtpEmailTransport::new(config.smtp.clone()));

    Ok(EmailVerificationServices::assemble(store, transport, config))
}

/// Load configuration from the environment
///
/// Reads the environment specific file (`.env.development` etc.) and then
/// `.env`; variables already set take precedence over both.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_core::repositories::InMemoryStore;
    use mail::MockEmailTransport;

    #[tokio::test]
    async fn test_assemble_shares_store_and_transport() {
        let mut config = AppConfig::default();
        config.smtp.sender_name = "Acme".to_string();
        config.verification.code_ttl_seconds = 300;

        let store = Arc::new(InMemoryStore::new());
        let transport = Arc::new(MockEmailTransport::new());
        let services = EmailVerificationServices::assemble(store.clone(), transport.clone(), &config);

        assert_eq!(services.notifier.config().code_ttl_minutes, 5);
        assert_eq!(services.notifier.config().sender_name, "Acme");

        let outcome = services.workflow.request_code("user@example.com").await;
        assert!(outcome.is_sent());
        assert_eq!(transport.message_count(), 1);

        let code = services.code_store.peek("user@example.com").await.unwrap();
        assert!(services.workflow.confirm_code("user@example.com", &code).await);
        assert!(store.raw_get("email_verification:user@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_build_services_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.rate_limit.max_requests = 0;

        let result = build_services(&config).await;
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
