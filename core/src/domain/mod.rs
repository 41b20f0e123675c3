//! Domain layer containing the records persisted in the key-value store.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
