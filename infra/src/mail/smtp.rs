//! SMTP email transport
//!
//! Port 465 connects with implicit TLS; any other port connects in plain
//! text and upgrades with STARTTLS when the server offers it. One connection
//! is opened per message and no retry is attempted.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use ev_core::errors::MailError;
use ev_core::services::notification::{EmailTransport, OutgoingEmail};
use ev_shared::config::smtp::IMPLICIT_TLS_PORT;
use ev_shared::SmtpConfig;

/// Connection settings resolved from a complete [`SmtpConfig`]
#[derive(Debug, Clone, Copy)]
pub(crate) struct SmtpSettings<'a> {
    pub server: &'a str,
    pub port: u16,
    pub email: &'a str,
    pub password: &'a str,
    pub sender_name: &'a str,
}

/// Email transport submitting messages to an SMTP relay
#[derive(Debug, Clone)]
pub struct SmtpEmailTransport {
    config: SmtpConfig,
}

impl SmtpEmailTransport {
    /// Create a transport; an incomplete configuration is reported on each send
    pub fn new(config: SmtpConfig) -> Self {
        if !config.is_complete() {
            tracing::warn!(
                missing = %config.missing_fields().join(","),
                "SMTP configuration incomplete, emails will not be sent"
            );
        }
        Self { config }
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }

    /// Resolve the settings required for delivery
    pub(crate) fn settings(&self) -> Result<SmtpSettings<'_>, MailError> {
        let missing = self.config.missing_fields();
        match (
            self.config.server.as_deref(),
            self.config.port,
            self.config.email.as_deref(),
            self.config.password.as_deref(),
        ) {
            (Some(server), Some(port), Some(email), Some(password)) if missing.is_empty() => {
                Ok(SmtpSettings {
                    server: server.trim(),
                    port,
                    email: email.trim(),
                    password,
                    sender_name: &self.config.sender_name,
                })
            }
            _ => Err(MailError::MissingConfig(
                missing.into_iter().map(String::from).collect(),
            )),
        }
    }

    /// Build the MIME message and its id
    pub(crate) fn build_message(
        settings: &SmtpSettings<'_>,
        email: &OutgoingEmail,
    ) -> Result<(Message, String), MailError> {
        let sender: Address = settings
            .email
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("sender: {}", e)))?;
        let name = Some(settings.sender_name.trim())
            .filter(|n| !n.is_empty())
            .map(String::from);
        let message_id = format!("<{}@{}>", Uuid::new_v4(), sender.domain());

        let mut builder = Message::builder()
            .from(Mailbox::new(name, sender))
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.as_str())
            .message_id(Some(message_id.clone()));
        for cc in &email.cc {
            builder = builder.cc(parse_mailbox(cc)?);
        }

        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        Ok((message, message_id))
    }

    /// Build the SMTP client for the configured endpoint
    pub(crate) fn build_transport(
        settings: &SmtpSettings<'_>,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let credentials = Credentials::new(settings.email.to_string(), settings.password.to_string());

        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(settings.server)
                .map_err(|e| MailError::Connection(format!("TLS setup failed: {}", e)))?
        } else {
            let parameters = TlsParameters::new(settings.server.to_string())
                .map_err(|e| MailError::Connection(format!("TLS setup failed: {}", e)))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.server)
                .tls(Tls::Opportunistic(parameters))
        };

        Ok(builder.port(settings.port).credentials(credentials).build())
    }
}

#[async_trait]
impl EmailTransport for SmtpEmailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        let settings = self.settings()?;
        let (message, message_id) = Self::build_message(&settings, email)?;
        let transport = Self::build_transport(&settings)?;

        tracing::debug!(
            server = settings.server,
            port = settings.port,
            implicit_tls = self.config.uses_implicit_tls(),
            recipients = 1 + email.cc.len(),
            "Submitting email to SMTP server"
        );

        transport
            .send(message)
            .await
            .map_err(|e| classify_smtp_error(&e))?;

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "smtp"
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress(format!("{}: {}", address, e)))
}

/// Where an SMTP failure originated
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FailureSource {
    /// The server answered with a negative reply code
    Reply(String),
    /// Timeout, TLS handshake or socket failure before a reply
    Network,
    /// Anything else reported by the client
    Other,
}

impl FailureSource {
    fn of(error: &lettre::transport::smtp::Error) -> Self {
        if let Some(code) = error.status() {
            return Self::Reply(code.to_string());
        }
        if error.is_timeout() || error.is_tls() || has_io_source(error) {
            return Self::Network;
        }
        Self::Other
    }
}

fn classify_smtp_error(error: &lettre::transport::smtp::Error) -> MailError {
    classify_failure(&FailureSource::of(error), error.to_string())
}

/// Sort a failure into the authentication, connection or transport class
pub(crate) fn classify_failure(source: &FailureSource, message: String) -> MailError {
    match source {
        FailureSource::Reply(code) if is_auth_failure_code(code) => {
            MailError::Authentication(message)
        }
        FailureSource::Reply(_) | FailureSource::Other => MailError::Transport(message),
        FailureSource::Network => MailError::Connection(message),
    }
}

/// 530, 534 and 535 replies reject the credentials or require authentication
pub(crate) fn is_auth_failure_code(code: &str) -> bool {
    code.starts_with("53")
}

fn has_io_source(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = error.source();
    while let Some(inner) = source {
        if inner.is::<std::io::Error>() {
            return true;
        }
        source = inner.source();
    }
    false
}
