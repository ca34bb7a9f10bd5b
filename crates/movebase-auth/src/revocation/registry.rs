//! Authoritative kill-switch for token hashes.
//!
//! A revocation entry overrides every other verdict: a not-yet-expired,
//! signature-valid, fingerprint-matching token is still rejected once its
//! hash is here. Entries carry a TTL mirroring the token's natural
//! expiry, so the registry never retains an entry past the point the
//! token would have died on its own.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use movebase_core::result::AppResult;
use movebase_core::traits::KeyValueStore;
use movebase_entity::token::{RevocationReason, RevocationRecord};
use movebase_store::keys;
use movebase_store::repositories::TokenShadowRepository;

/// Minimum entry TTL, so a token revoked at the edge of its natural
/// expiry still reliably overlaps any clock skew between nodes.
const MIN_TTL_SECONDS: u64 = 60;

/// Key/value-backed revocation registry.
#[derive(Debug, Clone)]
pub struct RevocationRegistry {
    /// Store holding revocation entries.
    store: Arc<dyn KeyValueStore>,
    /// Shadow records used to enumerate a user's live tokens.
    shadows: Arc<TokenShadowRepository>,
}

impl RevocationRegistry {
    /// Creates a registry over the given store and shadow repository.
    pub fn new(store: Arc<dyn KeyValueStore>, shadows: Arc<TokenShadowRepository>) -> Self {
        Self { store, shadows }
    }

    /// Checks whether a token hash has been revoked.
    pub async fn is_revoked(&self, token_hash: &str) -> AppResult<bool> {
        self.store.exists(&keys::revoked_token(token_hash)).await
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }

    /// Revokes a token hash unconditionally.
    pub async fn revoke(
        &self,
        token_hash: &str,
        user_id: Uuid,
        reason: RevocationReason,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let record = RevocationRecord {
            user_id,
            reason,
            expires_at,
        };
        let value = serde_json::to_string(&record)?;
        self.store
            .set(&keys::revoked_token(token_hash), &value, entry_ttl(expires_at))
            .await?;
        debug!(%user_id, %reason, "Token hash revoked");
        Ok(())
    }

    /// Atomically claims a token hash for revocation.
    ///
    /// Returns `true` if this call created the entry, `false` if the
    /// hash was already revoked. Refresh rotation uses this so exactly
    /// one of two concurrent rotations of the same stale token wins.
    pub async fn try_claim(
        &self,
        token_hash: &str,
        user_id: Uuid,
        reason: RevocationReason,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let record = RevocationRecord {
            user_id,
            reason,
            expires_at,
        };
        let value = serde_json::to_string(&record)?;
        let claimed = self
            .store
            .set_nx(&keys::revoked_token(token_hash), &value, entry_ttl(expires_at))
            .await?;
        if claimed {
            debug!(%user_id, %reason, "Token hash claimed for revocation");
        }
        Ok(claimed)
    }

    /// Revokes every live token for a user ("log out everywhere").
    ///
    /// Returns the number of tokens newly revoked by this call.
    pub async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
    ) -> AppResult<u64> {
        let now = Utc::now();
        let live = self.shadows.find_live_by_user(user_id, now).await?;
        let mut revoked = 0u64;

        for shadow in &live {
            if self
                .try_claim(&shadow.token_hash, user_id, reason, shadow.expires_at)
                .await?
            {
                revoked += 1;
            }
        }

        debug!(%user_id, %reason, revoked, "Revoked all live tokens for user");
        Ok(revoked)
    }
}

/// TTL for a revocation entry: until the token's own expiry, floored.
fn entry_ttl(expires_at: DateTime<Utc>) -> Duration {
    let remaining = (expires_at - Utc::now()).num_seconds();
    Duration::from_secs((remaining.max(0) as u64).max(MIN_TTL_SECONDS))
}
