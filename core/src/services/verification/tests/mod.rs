mod rate_limiter_tests;
mod workflow_tests;
