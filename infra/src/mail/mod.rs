//! Mail module
//!
//! SMTP delivery through `lettre` and a mock transport that records
//! messages in memory for development and tests.

pub mod mock_mail;
pub mod smtp;


pub use mock_mail::{MockEmailTransport, SentEmail, SimulatedFailure};
pub use smtp::SmtpEmailTransport;
