//! Rate limiter configuration.

use serde::{Deserialize, Serialize};

/// Token-bucket rate limiter configuration.
///
/// Two buckets run per key: a steady-state bucket refilled continuously,
/// and a tighter burst bucket that catches short spikes the steady bucket
/// would tolerate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enforced at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Steady bucket capacity (maximum stored tokens).
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    /// Steady bucket refill rate in tokens per second.
    #[serde(default = "default_refill_per_second")]
    pub refill_per_second: f64,
    /// Burst bucket capacity.
    #[serde(default = "default_burst_capacity")]
    pub burst_capacity: u32,
    /// Burst bucket window in seconds; the burst bucket refills at
    /// `burst_capacity / burst_window_seconds` tokens per second.
    #[serde(default = "default_burst_window")]
    pub burst_window_seconds: u64,
    /// Path prefixes that bypass both buckets entirely.
    #[serde(default = "default_bypass_paths")]
    pub bypass_paths: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            capacity: default_capacity(),
            refill_per_second: default_refill_per_second(),
            burst_capacity: default_burst_capacity(),
            burst_window_seconds: default_burst_window(),
            bypass_paths: default_bypass_paths(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> u32 {
    600
}

fn default_refill_per_second() -> f64 {
    10.0
}

fn default_burst_capacity() -> u32 {
    100
}

fn default_burst_window() -> u64 {
    60
}

fn default_bypass_paths() -> Vec<String> {
    vec!["/api/health".to_string()]
}
