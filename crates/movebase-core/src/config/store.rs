//! Persistent store configuration.

use serde::{Deserialize, Serialize};

/// Key/value store provider selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"memory"` or `"redis"` (requires the
    /// `redis-store` feature on `movebase-store`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis connection URL, used when `provider = "redis"`.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Key prefix applied to every store key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Default TTL for entries written without an explicit one, in seconds.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
            default_ttl_seconds: default_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_key_prefix() -> String {
    "movebase".to_string()
}

fn default_ttl() -> u64 {
    3600
}
