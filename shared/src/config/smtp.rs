//! SMTP delivery configuration module

use serde::{Deserialize, Serialize};

/// Port that implies implicit TLS (SMTPS)
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP transport configuration
///
/// Every connection setting is optional so that an incomplete deployment
/// still starts; delivery then fails with a configuration error instead.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP server hostname (e.g., smtp.example.com)
    #[serde(default)]
    pub server: Option<String>,

    /// SMTP server port; 465 selects implicit TLS, anything else STARTTLS
    #[serde(default)]
    pub port: Option<u16>,

    /// Sender address, also used as the authentication username
    #[serde(default)]
    pub email: Option<String>,

    /// Password or app-specific password for authentication
    #[serde(default)]
    pub password: Option<String>,

    /// Display name used in the From header and the email footer
    #[serde(default)]
    pub sender_name: String,
}

impl SmtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            server: non_empty_var("SMTP_SERVER"),
            port: non_empty_var("SMTP_PORT").and_then(|v| v.parse().ok()),
            email: non_empty_var("SMTP_EMAIL"),
            password: non_empty_var("SMTP_PASSWORD"),
            sender_name: std::env::var("SMTP_SENDER_NAME").unwrap_or_default(),
        }
    }

    /// Create a complete configuration
    pub fn new(
        server: impl Into<String>,
        port: u16,
        email: impl Into<String>,
        password: impl Into<String>,
        sender_name: impl Into<String>,
    ) -> Self {
        Self {
            server: Some(server.into()),
            port: Some(port),
            email: Some(email.into()),
            password: Some(password.into()),
            sender_name: sender_name.into(),
        }
    }

    /// Names of the settings required for delivery that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.server) {
            missing.push("server");
        }
        if self.port.is_none() {
            missing.push("port");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        if is_blank(&self.password) {
            missing.push("password");
        }
        missing
    }

    /// Whether every setting required for delivery is present
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Whether the configured port selects implicit TLS
    pub fn uses_implicit_tls(&self) -> bool {
        self.port == Some(IMPLICIT_TLS_PORT)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
