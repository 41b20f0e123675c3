//! Email notification module
//!
//! Renders the verification email and hands it to an [`EmailTransport`].
//! Delivery failures of every class are logged and reported as `false`.

mod notifier;
mod template;
mod traits;
mod types;


pub use notifier::{Notifier, NotifierConfig};
pub use template::{VerificationEmailTemplate, VERIFICATION_SUBJECT};
pub use traits::EmailTransport;
pub use types::{EmailData, OutgoingEmail};
