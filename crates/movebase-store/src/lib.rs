//! # movebase-store
//!
//! Store providers and repositories for the MoveBase security engine:
//!
//! - **memory**: in-process key/value store with per-entry TTL and lazy
//!   expiry-on-read
//! - **redis**: Redis-backed store using native `EX`/`NX` expiry (behind
//!   the `redis-store` feature)
//! - in-memory repositories for accounts, credentials, sessions, and
//!   token shadows
//!
//! The key/value provider is selected at runtime based on configuration.

pub mod keys;
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-store")]
pub mod redis;
pub mod repositories;

pub use memory::MemoryStore;
pub use provider::StoreManager;
