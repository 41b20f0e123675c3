//! Email payload types

use ev_shared::email::split_address_list;
use serde::{Deserialize, Serialize};

/// Caller-facing description of an email to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailData {
    /// Primary recipient
    pub to_email: String,
    pub subject: String,
    /// HTML body
    pub html_content: String,
    /// Comma separated carbon-copy recipients
    #[serde(default)]
    pub cc_email: Option<String>,
}

impl EmailData {
    pub fn new(
        to_email: impl Into<String>,
        subject: impl Into<String>,
        html_content: impl Into<String>,
    ) -> Self {
        Self {
            to_email: to_email.into(),
            subject: subject.into(),
            html_content: html_content.into(),
            cc_email: None,
        }
    }

    /// Add carbon-copy recipients as a comma separated list
    pub fn with_cc(mut self, cc_email: impl Into<String>) -> Self {
        self.cc_email = Some(cc_email.into());
        self
    }
}

/// Message handed to an [`EmailTransport`](super::EmailTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    /// Carbon-copy recipients, trimmed and non-empty
    pub cc: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

impl OutgoingEmail {
    /// Every envelope recipient, primary first
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.to.as_str()).chain(self.cc.iter().map(String::as_str))
    }
}

impl From<&EmailData> for OutgoingEmail {
    fn from(data: &EmailData) -> Self {
        Self {
            to: data.to_email.trim().to_string(),
            cc: data
                .cc_email
                .as_deref()
                .map(split_address_list)
                .unwrap_or_default(),
            subject: data.subject.clone(),
            html_body: data.html_content.clone(),
        }
    }
}
