//! Expired session and shadow sweep.
//!
//! The memory store expires lazily at lookup; this sweep is what keeps
//! records for never-read-again keys from accumulating. With a
//! store-native TTL backend it only handles session deactivation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use movebase_core::result::AppResult;
use movebase_entity::token::RevocationReason;
use movebase_store::repositories::{SessionRepository, TokenShadowRepository};

/// Handles periodic cleanup of expired sessions and token shadows.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    /// Session persistence.
    sessions: Arc<SessionRepository>,
    /// Token shadows.
    shadows: Arc<TokenShadowRepository>,
}

impl SessionCleanup {
    /// Creates a new cleanup handler.
    pub fn new(sessions: Arc<SessionRepository>, shadows: Arc<TokenShadowRepository>) -> Self {
        Self { sessions, shadows }
    }

    /// Runs one sweep cycle. Returns the number of sessions deactivated.
    pub async fn run_sweep(&self) -> AppResult<u64> {
        let now = Utc::now();
        let expired = self.sessions.find_expired(now).await?;
        let mut cleaned = 0u64;

        for session in &expired {
            // Natural expiry: the tokens bound to the session are already
            // dead to verification, so no revocation entry is needed.
            match self
                .sessions
                .deactivate(session.id, RevocationReason::Expired)
                .await
            {
                Ok(Some(_)) => cleaned += 1,
                Ok(None) => {}
                Err(e) => {
                    error!(session_id = %session.id, error = %e, "Failed to deactivate expired session");
                }
            }
        }

        let shadows_dropped = self.shadows.sweep(now).await?;

        if cleaned > 0 || shadows_dropped > 0 {
            info!(cleaned, shadows_dropped, "Session sweep completed");
        }

        Ok(cleaned)
    }
}
