//! KeyValueStore implementation over the Redis client

use async_trait::async_trait;

use ev_core::errors::StoreError;
use ev_core::repositories::KeyValueStore;

use crate::InfrastructureError;

use super::redis_client::RedisClient;

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::Backend(error.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(RedisClient::get(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(RedisClient::set(self, key, value).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(RedisClient::delete(self, key).await?)
    }
}
