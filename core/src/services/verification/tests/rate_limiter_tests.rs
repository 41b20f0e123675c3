//! Unit tests for issuance rate limiting

use ev_shared::RateLimitConfig;

use crate::services::verification::{CodeStoreConfig, RateLimitStatus};

use super::mocks::{config_with_limit, fixture, fixture_with, IDENTITY, START};

const RATE_KEY: &str = "email_verification_limit:user@example.com";

fn stored_window(raw: Option<String>) -> serde_json::Value {
    serde_json::from_str(&raw.expect("window stored")).unwrap()
}

#[tokio::test]
async fn test_first_request_opens_window() {
    let f = fixture();

    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));

    let window = stored_window(f.store.raw_get(RATE_KEY).await);
    assert_eq!(window["count"], 1);
    assert_eq!(window["expires_at"], START + 3600);
}

#[tokio::test]
async fn test_sixth_request_is_refused() {
    let f = fixture();

    for _ in 0..5 {
        assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));
    }

    f.clock.advance(600);
    let (allowed, retry_after) = f.codes.can_issue(IDENTITY).await;
    assert!(!allowed);
    assert_eq!(retry_after, 3000);

    let window = stored_window(f.store.raw_get(RATE_KEY).await);
    assert_eq!(window["count"], 5);
}

#[tokio::test]
async fn test_refusal_does_not_count() {
    let f = fixture_with(config_with_limit(2, 100));

    f.codes.can_issue(IDENTITY).await;
    f.codes.can_issue(IDENTITY).await;
    for _ in 0..3 {
        assert_eq!(
            f.codes.check_rate_limit(IDENTITY).await,
            RateLimitStatus::Exceeded {
                retry_after_seconds: 100
            }
        );
    }
    assert_eq!(stored_window(f.store.raw_get(RATE_KEY).await)["count"], 2);
}

#[tokio::test]
async fn test_window_resets_after_elapsing() {
    let f = fixture();
    for _ in 0..6 {
        f.codes.can_issue(IDENTITY).await;
    }

    f.clock.advance(3600);
    assert_eq!(f.codes.can_issue(IDENTITY).await, (false, 0));

    f.clock.advance(1);
    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));

    let window = stored_window(f.store.raw_get(RATE_KEY).await);
    assert_eq!(window["count"], 1);
    assert_eq!(window["expires_at"], START + 3601 + 3600);
}

#[tokio::test]
async fn test_legacy_counter_is_migrated() {
    let f = fixture();
    f.store.raw_insert(RATE_KEY, "2").await;

    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));

    let window = stored_window(f.store.raw_get(RATE_KEY).await);
    assert_eq!(window["count"], 3);
    assert_eq!(window["expires_at"], START + 3600);
}

#[tokio::test]
async fn test_legacy_counter_at_limit_is_refused() {
    let f = fixture();
    f.store.raw_insert(RATE_KEY, "7").await;

    assert_eq!(f.codes.can_issue(IDENTITY).await, (false, 3600));

    let window = stored_window(f.store.raw_get(RATE_KEY).await);
    assert_eq!(window["count"], 7);
}

#[tokio::test]
async fn test_corrupt_window_is_replaced() {
    let f = fixture();
    f.store.raw_insert(RATE_KEY, "{broken").await;

    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));
    assert_eq!(stored_window(f.store.raw_get(RATE_KEY).await)["count"], 1);
}

#[tokio::test]
async fn test_window_missing_fields_is_treated_as_elapsed() {
    let f = fixture();
    f.store.raw_insert(RATE_KEY, r#"{"count": 9}"#).await;

    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));
    assert_eq!(stored_window(f.store.raw_get(RATE_KEY).await)["count"], 1);
}

#[tokio::test]
async fn test_fails_open_on_read_error() {
    let f = fixture();
    for _ in 0..5 {
        f.codes.can_issue(IDENTITY).await;
    }
    f.store.fail_reads(true);

    assert!(f.codes.try_check_rate_limit(IDENTITY).await.is_err());
    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));
}

#[tokio::test]
async fn test_fails_open_on_write_error() {
    let f = fixture();
    f.store.fail_writes(true);

    assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));
    assert_eq!(f.store.raw_get(RATE_KEY).await, None);
}

#[tokio::test]
async fn test_disabled_limit_skips_store() {
    let config = CodeStoreConfig {
        rate_limit: RateLimitConfig::disabled(),
        ..CodeStoreConfig::default()
    };
    let f = fixture_with(config);

    for _ in 0..20 {
        assert_eq!(f.codes.can_issue(IDENTITY).await, (true, 0));
    }
    assert_eq!(f.store.read_count(), 0);
    assert_eq!(f.store.write_count(), 0);
}

#[tokio::test]
async fn test_status_tuple() {
    assert_eq!(RateLimitStatus::Allowed.as_tuple(), (true, 0));
    assert_eq!(
        RateLimitStatus::Exceeded {
            retry_after_seconds: 42
        }
        .as_tuple(),
        (false, 42)
    );
}
