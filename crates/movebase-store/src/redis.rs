//! Redis-backed store provider.
//!
//! Uses native `EX`/`NX` expiry so revocation entries self-expire at the
//! token's natural deadline without any sweeper.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use movebase_core::config::store::StoreConfig;
use movebase_core::error::{AppError, ErrorKind};
use movebase_core::result::AppResult;
use movebase_core::traits::KeyValueStore;

/// Redis store provider with a reconnecting connection manager.
#[derive(Debug, Clone)]
pub struct RedisStore {
    /// Redis connection manager (pooled, reconnecting).
    conn: ConnectionManager,
    /// Key prefix for all keys.
    key_prefix: String,
}

impl RedisStore {
    /// Connect to Redis from configuration.
    pub async fn connect(config: &StoreConfig) -> AppResult<Self> {
        info!(url = %mask_redis_url(&config.redis_url), "Connecting to Redis");

        let client = Client::open(config.redis_url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to connect to Redis", e)
        })?;

        info!("Successfully connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn.clone();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&full_key, value, ttl.as_secs().max(1))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn.clone();

        // SET key value EX ttl NX
        let result: Option<String> = redis::cmd("SET")
            .arg(&full_key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(result.is_some())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn.clone();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn.clone();
        let result: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

/// Mask password in Redis URL for safe logging.
fn mask_redis_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
