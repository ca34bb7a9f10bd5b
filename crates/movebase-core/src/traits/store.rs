//! Key/value store trait for pluggable persistence backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for TTL-aware key/value backends (in-memory or Redis).
///
/// All values are serialized as strings (JSON). Backends are responsible
/// for TTL enforcement: an expired key must behave as absent from `get`
/// and `exists`, whether enforced natively or lazily at lookup.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a value only if the key does not already exist (NX).
    /// Returns `true` if the value was set, `false` if the key already existed.
    ///
    /// This is the atomic claim primitive used by refresh-token rotation.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete a key from the store.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists (and has not expired).
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Reclaim expired entries that lazy expiry has not touched.
    /// Backends with native TTL enforcement have nothing to do here.
    async fn sweep_expired(&self) -> AppResult<u64> {
        Ok(0)
    }
}
