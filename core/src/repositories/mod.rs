//! Storage ports and their in-process implementations.

pub mod store;

pub use store::{InMemoryStore, KeyValueStore};
