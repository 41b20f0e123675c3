//! Integration tests for the Redis-backed code store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p ev_infra --test redis_integration -- --ignored

use std::sync::Arc;

use ev_core::repositories::KeyValueStore;
use ev_core::services::verification::{CodeStore, CodeStoreConfig};
use ev_infra::cache::{CacheConfig, RedisClient};
use ev_shared::{RateLimitConfig, VerificationConfig};

fn redis_config() -> CacheConfig {
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
}

fn test_code_store_config(prefix: &str) -> CodeStoreConfig {
    CodeStoreConfig::new(
        VerificationConfig {
            key_prefix: format!("test:{}:email_verification:", prefix),
            ..VerificationConfig::default()
        },
        RateLimitConfig {
            key_prefix: format!("test:{}:email_verification_limit:", prefix),
            ..RateLimitConfig::default()
        },
    )
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(redis_config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_delete() {
    let client = RedisClient::new(redis_config()).await.unwrap();
    let key = "test:kv:user@example.com";

    KeyValueStore::set(&client, key, r#"{"code":"123456","expires_at":1}"#)
        .await
        .unwrap();
    assert_eq!(
        KeyValueStore::get(&client, key).await.unwrap(),
        Some(r#"{"code":"123456","expires_at":1}"#.to_string())
    );
    assert!(KeyValueStore::delete(&client, key).await.unwrap());
    assert!(!KeyValueStore::delete(&client, key).await.unwrap());
    assert_eq!(KeyValueStore::get(&client, key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_issue_and_verify() {
    let client = Arc::new(RedisClient::new(redis_config()).await.unwrap());
    let codes = CodeStore::new(client, test_code_store_config("issue"));
    let identity = "user@example.com";

    assert!(codes.issue(identity, "483920").await);
    assert!(!codes.verify(identity, "000000").await);
    assert!(codes.verify(identity, "483920").await);
    assert!(!codes.verify(identity, "483920").await);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_rate_limit_and_legacy_counter() {
    let client = Arc::new(RedisClient::new(redis_config()).await.unwrap());
    let config = test_code_store_config("rate");
    let key = config.rate_key("user@example.com");
    let codes = CodeStore::new(client.clone(), config);

    client.set(&key, "4").await.unwrap();

    assert_eq!(codes.can_issue("user@example.com").await, (true, 0));
    let (allowed, retry_after) = codes.can_issue("user@example.com").await;
    assert!(!allowed);
    assert!(retry_after > 0 && retry_after <= 3600);

    let stored: serde_json::Value =
        serde_json::from_str(&client.get(&key).await.unwrap().unwrap()).unwrap();
    assert_eq!(stored["count"], 5);

    client.delete(&key).await.unwrap();
}
