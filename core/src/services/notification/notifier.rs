//! Notifier sending verification emails through an EmailTransport

use std::sync::Arc;

use chrono::{Datelike, Utc};
use ev_shared::email::mask_email;

use crate::domain::entities::DEFAULT_CODE_TTL_SECONDS;
use crate::errors::MailError;

use super::template::{VerificationEmailTemplate, VERIFICATION_SUBJECT};
use super::traits::EmailTransport;
use super::types::{EmailData, OutgoingEmail};

/// Presentation settings for the verification email
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Display name printed in the footer
    pub sender_name: String,
    /// Validity shown in the email body
    pub code_ttl_minutes: u64,
}

impl NotifierConfig {
    pub fn new(sender_name: impl Into<String>, code_ttl_minutes: u64) -> Self {
        Self {
            sender_name: sender_name.into(),
            code_ttl_minutes,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            sender_name: String::new(),
            code_ttl_minutes: DEFAULT_CODE_TTL_SECONDS / 60,
        }
    }
}

/// Formats verification emails and submits them to a transport
pub struct Notifier<T: EmailTransport> {
    transport: Arc<T>,
    config: NotifierConfig,
}

impl<T: EmailTransport> Notifier<T> {
    pub fn new(transport: Arc<T>, config: NotifierConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Send the verification email carrying `code` to `to_email`
    ///
    /// # Returns
    ///
    /// * `true` if the transport accepted the message, `false` otherwise
    pub async fn send_verification_code(&self, to_email: &str, code: &str) -> bool {
        let template = VerificationEmailTemplate::new(
            code,
            self.config.sender_name.as_str(),
            self.config.code_ttl_minutes,
            Utc::now().year(),
        );

        let html_content = match template.render_html() {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(
                    to = %mask_email(to_email),
                    error = %e,
                    event = "email_render_failed",
                    "Failed to render verification email"
                );
                return false;
            }
        };

        self.send_email(EmailData::new(to_email, VERIFICATION_SUBJECT, html_content))
            .await
    }

    /// Send an arbitrary email; every failure is logged and reported as `false`
    pub async fn send_email(&self, data: EmailData) -> bool {
        let recipient = mask_email(&data.to_email);

        match self.try_send_email(&data).await {
            Ok(message_id) => {
                tracing::info!(
                    to = %recipient,
                    provider = self.transport.provider_name(),
                    message_id = %message_id,
                    event = "email_sent",
                    "Email sent"
                );
                true
            }
            Err(MailError::MissingConfig(fields)) => {
                tracing::error!(
                    to = %recipient,
                    missing = %fields.join(","),
                    event = "email_config_missing",
                    "Cannot send email: missing SMTP configuration"
                );
                false
            }
            Err(MailError::Authentication(reason)) => {
                tracing::error!(
                    to = %recipient,
                    error = %reason,
                    event = "email_auth_failed",
                    "SMTP authentication failed"
                );
                false
            }
            Err(MailError::Connection(reason)) => {
                tracing::error!(
                    to = %recipient,
                    error = %reason,
                    event = "email_connect_failed",
                    "Failed to connect to SMTP server"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    to = %recipient,
                    kind = e.kind(),
                    error = %e,
                    event = "email_send_failed",
                    "Failed to send email"
                );
                false
            }
        }
    }

    /// Send an email, surfacing the failure class
    pub async fn try_send_email(&self, data: &EmailData) -> Result<String, MailError> {
        let email = OutgoingEmail::from(data);
        self.transport.send(&email).await
    }
}
