//! Trait for outbound email delivery

use async_trait::async_trait;

use crate::errors::MailError;

use super::types::OutgoingEmail;

/// Delivers a single message with one attempt and no retry
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Submit `email` for delivery
    ///
    /// # Returns
    /// * `Ok(String)` - Message id or server response summary
    /// * `Err(MailError)` - The class of failure that prevented delivery
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError>;

    /// Name of the delivery provider, for logs
    fn provider_name(&self) -> &str;
}
