//! In-memory key/value store with per-entry TTL.
//!
//! Expiry is lazy: a read past the deadline behaves as a miss and drops
//! the entry. `sweep` exists for callers that want to reclaim memory for
//! keys that are never read again.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;

use movebase_core::result::AppResult;
use movebase_core::traits::KeyValueStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// In-process store provider backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Remove every expired entry. Returns the number removed.
    pub fn sweep(&self) -> u64 {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        (before - self.entries.len()) as u64
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Expired: drop lazily so the map stays bounded.
        self.entries
            .remove_if(key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();
        let fresh = Entry {
            value: value.to_string(),
            expires_at: now + ttl,
        };
        // The entry API holds the shard lock across the check and the
        // insert, so two concurrent claims cannot both win.
        match self.entries.entry(key.to_string()) {
            MapEntry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(fresh);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(fresh);
                Ok(true)
            }
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn sweep_expired(&self) -> AppResult<u64> {
        Ok(self.sweep())
    }
}
