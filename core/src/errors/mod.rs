//! Error types for store access, stored record decoding and email delivery.

use thiserror::Error;

/// Failures of the external key-value store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store serialization error: {0}")]
    Serialization(String),
}

/// A stored value that cannot be decoded into its record type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Corrupt stored record: {0}")]
    Corrupt(String),
}

/// Email delivery failures, grouped by the class of fault
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("Missing SMTP configuration: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to connect to SMTP server: {0}")]
    Connection(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

impl MailError {
    /// Short classification used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            MailError::MissingConfig(_) => "config",
            MailError::InvalidAddress(_) => "address",
            MailError::Build(_) => "build",
            MailError::Authentication(_) => "authentication",
            MailError::Connection(_) => "connection",
            MailError::Transport(_) => "transport",
        }
    }
}
