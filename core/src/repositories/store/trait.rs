//! Key-value store trait defining the operations the verification records rely on.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreError;

/// External key-value store holding verification records and rate windows
///
/// Values are UTF-8 strings. No TTL is ever requested of the store; expiry
/// is computed by the caller from the timestamps inside each value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` if the key exists
    /// * `Ok(None)` if it does not
    /// * `Err(StoreError)` if the store could not be reached
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`
    ///
    /// # Returns
    /// * `Ok(true)` if a value was removed, `Ok(false)` if none existed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        (**self).delete(key).await
    }
}
