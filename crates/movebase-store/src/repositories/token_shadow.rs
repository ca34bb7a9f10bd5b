//! Token shadow repository.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use movebase_core::result::AppResult;
use movebase_entity::TokenShadow;

/// Token shadows keyed by token hash.
///
/// Shadows expire lazily: queries filter on the shadow's `expires_at`
/// and `sweep` reclaims entries whose tokens are long dead.
#[derive(Debug, Default)]
pub struct TokenShadowRepository {
    shadows: DashMap<String, TokenShadow>,
}

impl TokenShadowRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a shadow for a freshly issued token.
    pub async fn record(&self, shadow: TokenShadow) -> AppResult<()> {
        self.shadows.insert(shadow.token_hash.clone(), shadow);
        Ok(())
    }

    /// All shadows for a user whose tokens have not naturally expired.
    pub async fn find_live_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TokenShadow>> {
        Ok(self
            .shadows
            .iter()
            .filter(|s| s.user_id == user_id && s.expires_at > now)
            .map(|s| s.value().clone())
            .collect())
    }

    /// Drop shadows for naturally expired tokens. Returns the number removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let before = self.shadows.len();
        self.shadows.retain(|_, shadow| shadow.expires_at > now);
        Ok((before - self.shadows.len()) as u64)
    }
}
