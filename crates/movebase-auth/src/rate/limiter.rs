//! Token bucket rate limiter with a secondary burst bucket.
//!
//! Each key carries two buckets updated under one lock acquisition, so a
//! request sees a single atomic read-modify-write: the steady bucket
//! bounds sustained throughput, and an independent, tighter burst bucket
//! catches short spikes the steady bucket's accumulated capacity would
//! otherwise tolerate. A request is admitted only when both buckets hold
//! a token, and consumes from both together or not at all.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use movebase_core::config::rate_limit::RateLimitConfig;

use crate::jwt::hash_token;

/// Verdict for one request against one key.
#[derive(Debug, Clone, PartialEq)]
pub enum RateDecision {
    /// Request admitted.
    Allowed,
    /// Request denied; retry after roughly this long.
    Denied {
        /// Time until the limiting bucket refills one token.
        retry_after: Duration,
    },
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn full(capacity: u32, now: Instant) -> Self {
        Self {
            tokens: capacity as f64,
            last_refill: now,
        }
    }

    fn refill(&mut self, capacity: u32, rate: f64, now: Instant) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * rate).min(capacity as f64);
        self.last_refill = now;
    }

    /// Seconds until one whole token is available.
    fn time_to_token(&self, rate: f64) -> Duration {
        if self.tokens >= 1.0 || rate <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64((1.0 - self.tokens) / rate)
    }
}

#[derive(Debug, Clone)]
struct KeyBuckets {
    steady: Bucket,
    burst: Bucket,
    last_seen: Instant,
}

/// In-memory token bucket rate limiter.
#[derive(Debug)]
pub struct RateLimiter {
    /// Key → bucket pair state.
    buckets: Mutex<HashMap<String, KeyBuckets>>,
    config: RateLimitConfig,
    /// Burst refill rate derived from capacity over window.
    burst_rate: f64,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(config: RateLimitConfig) -> Self {
        let burst_rate = config.burst_capacity as f64 / config.burst_window_seconds.max(1) as f64;
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
            burst_rate,
        }
    }

    /// Whether the path is exempt from rate limiting entirely.
    pub fn is_bypassed(&self, path: &str) -> bool {
        self.config
            .bypass_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Attempts to consume one token from both buckets for the key.
    pub async fn check(&self, key: &str) -> RateDecision {
        if !self.config.enabled {
            return RateDecision::Allowed;
        }

        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;

        let entry = buckets.entry(key.to_string()).or_insert_with(|| KeyBuckets {
            steady: Bucket::full(self.config.capacity, now),
            burst: Bucket::full(self.config.burst_capacity, now),
            last_seen: now,
        });
        entry.last_seen = now;

        entry
            .steady
            .refill(self.config.capacity, self.config.refill_per_second, now);
        entry
            .burst
            .refill(self.config.burst_capacity, self.burst_rate, now);

        if entry.steady.tokens >= 1.0 && entry.burst.tokens >= 1.0 {
            entry.steady.tokens -= 1.0;
            entry.burst.tokens -= 1.0;
            return RateDecision::Allowed;
        }

        // Whichever bucket is dry dictates the wait.
        let steady_wait = entry.steady.time_to_token(self.config.refill_per_second);
        let burst_wait = entry.burst.time_to_token(self.burst_rate);
        RateDecision::Denied {
            retry_after: steady_wait.max(burst_wait).max(Duration::from_secs(1)),
        }
    }

    /// Drops bucket state for keys idle longer than `idle`. Bucket state
    /// is ephemeral; an evicted key simply starts full again.
    pub async fn prune_idle(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;
        let before = buckets.len();
        buckets.retain(|_, entry| now.duration_since(entry.last_seen) < idle);
        before - buckets.len()
    }
}

/// Resolves the rate-limit key for a request, preferring an API-key
/// credential over the bearer token over the raw client IP.
pub fn resolve_rate_key(
    api_key: Option<&str>,
    bearer_token: Option<&str>,
    ip_address: &str,
) -> String {
    if let Some(key) = api_key {
        return format!("api:{}", hash_token(key));
    }
    if let Some(token) = bearer_token {
        return format!("tok:{}", hash_token(token));
    }
    format!("ip:{ip_address}")
}
