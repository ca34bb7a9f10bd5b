//! Per-key token-bucket rate limiting.

pub mod limiter;

pub use limiter::{RateDecision, RateLimiter, resolve_rate_key};
