//! Business services containing the verification logic.

pub mod clock;
pub mod notification;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, MockClock, SystemClock};
pub use notification::{
    EmailData, EmailTransport, Notifier, NotifierConfig, OutgoingEmail,
};
pub use verification::{
    CodeStore, CodeStoreConfig, RateLimitStatus, RequestCodeOutcome, VerificationWorkflow,
    VerifyOutcome,
};
