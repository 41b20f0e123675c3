//! Unit tests for stored records

mod rate_window_tests;
