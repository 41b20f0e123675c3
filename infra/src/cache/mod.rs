//! Cache module for Redis-backed storage
//!
//! Provides the Redis client with retry logic and its `KeyValueStore`
//! implementation holding verification records and rate windows.

pub mod redis_client;
mod store_adapter;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use ev_shared::CacheConfig;
