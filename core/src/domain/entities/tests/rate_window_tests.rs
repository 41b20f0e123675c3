//! Unit tests for the rate window and its stored encodings

use crate::domain::entities::rate_window::{RateWindow, RateWindowEncoding, DEFAULT_WINDOW_SECONDS};
use crate::errors::RecordError;

#[test]
fn test_open_window() {
    let window = RateWindow::open(10_000, DEFAULT_WINDOW_SECONDS);
    assert_eq!(window.count, 1);
    assert_eq!(window.expires_at, 13_600);
    assert!(!window.is_elapsed(13_600));
    assert!(window.is_elapsed(13_601));
}

#[test]
fn test_exhaustion_and_retry_after() {
    let mut window = RateWindow::open(0, 3600);
    for _ in 0..4 {
        window.increment();
    }
    assert_eq!(window.count, 5);
    assert!(window.is_exhausted(5));
    assert!(!window.is_exhausted(6));
    assert_eq!(window.retry_after(600), 3000);
    assert_eq!(window.retry_after(5000), 0);
}

#[test]
fn test_oversized_window_saturates_instead_of_wrapping() {
    let window = RateWindow::open(10_000, u64::MAX);
    assert_eq!(window.expires_at, i64::MAX);
    assert!(!window.is_elapsed(10_000));

    let decoded = RateWindowEncoding::decode("2", 10_000, u64::MAX).unwrap();
    assert_eq!(decoded.into_window().expires_at, i64::MAX);
}

#[test]
fn test_decode_structured() {
    let decoded = RateWindowEncoding::decode(r#"{"count": 3, "expires_at": 5000}"#, 1000, 3600).unwrap();
    assert!(!decoded.needs_migration());
    assert_eq!(decoded.into_window(), RateWindow { count: 3, expires_at: 5000 });
}

#[test]
fn test_decode_structured_with_missing_fields() {
    let decoded = RateWindowEncoding::decode("{}", 1000, 3600).unwrap();
    let window = decoded.into_window();
    assert_eq!(window, RateWindow { count: 0, expires_at: 0 });
    assert!(window.is_elapsed(1000));
}

#[test]
fn test_decode_legacy_scalar() {
    let decoded = RateWindowEncoding::decode("4", 1000, 3600).unwrap();
    assert!(decoded.needs_migration());
    assert_eq!(decoded.into_window(), RateWindow { count: 4, expires_at: 4600 });

    let padded = RateWindowEncoding::decode(" 2\n", 0, 60).unwrap();
    assert_eq!(padded, RateWindowEncoding::Legacy(RateWindow { count: 2, expires_at: 60 }));
}

#[test]
fn test_decode_rejects_unrecognized_values() {
    for raw in ["-1", "abc", "\"3\"", "99999999999999999999"] {
        match RateWindowEncoding::decode(raw, 0, 3600) {
            Err(RecordError::Corrupt(_)) => {}
            other => panic!("expected corrupt window for {:?}, got {:?}", raw, other),
        }
    }
}
