//! Key-value store module.

mod r#trait;
pub use r#trait::KeyValueStore;

mod memory;
pub use memory::InMemoryStore;
