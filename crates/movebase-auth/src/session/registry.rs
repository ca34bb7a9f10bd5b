//! Per-user device session tracking with a concurrency cap.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use movebase_core::config::session::SessionConfig;
use movebase_core::result::AppResult;
use movebase_entity::session::{DeviceInfo, Session};
use movebase_entity::token::RevocationReason;
use movebase_store::repositories::SessionRepository;

use crate::revocation::RevocationRegistry;

/// Tracks active device sessions and enforces the per-user cap.
///
/// Teardown always goes through the revocation registry so a session's
/// refresh token dies with the session. Cap enforcement counts, evicts,
/// then inserts; two truly simultaneous logins may each observe the
/// pre-insert count and momentarily overshoot the cap by one; the next
/// enforcement pass corrects it. This is eventual consistency, not a
/// hard bound under true concurrency.
#[derive(Clone)]
pub struct SessionRegistry {
    /// Session persistence.
    sessions: Arc<SessionRepository>,
    /// Revocation registry for consistent teardown.
    revocations: Arc<RevocationRegistry>,
    /// Session configuration.
    config: SessionConfig,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionRegistry {
    /// Creates a new session registry.
    pub fn new(
        sessions: Arc<SessionRepository>,
        revocations: Arc<RevocationRegistry>,
        config: SessionConfig,
    ) -> Self {
        Self {
            sessions,
            revocations,
            config,
        }
    }

    /// The configured absolute session lifetime.
    pub fn session_lifetime(&self) -> chrono::Duration {
        chrono::Duration::hours(self.config.absolute_timeout_hours as i64)
    }

    /// Creates a session for a fresh login, evicting the session with
    /// the least-recent activity (ties broken by creation order) while
    /// the user is at or above the cap. The session ID is supplied by
    /// the caller so the tokens issued for the login can carry it.
    pub async fn create_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        token_hash: &str,
        device: DeviceInfo,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session> {
        let max_sessions = self.config.max_sessions as u64;
        let now = Utc::now();

        while self.sessions.count_active_by_user(user_id, now).await? >= max_sessions {
            let oldest = match self.sessions.find_oldest_active_by_user(user_id, now).await? {
                Some(session) => session,
                None => break,
            };
            info!(
                %user_id,
                evicted_session = %oldest.id,
                last_activity = %oldest.last_activity,
                "Evicting oldest session at concurrency cap"
            );
            self.teardown(&oldest, RevocationReason::Revoked).await?;
        }

        let session = Session::new(session_id, user_id, token_hash, device, expires_at);
        self.sessions.create(session).await
    }

    /// Looks up a session and returns it only if it is still live.
    /// Used on every authenticated request so an evicted or revoked
    /// session cuts off its access tokens immediately.
    pub async fn validate(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        let session = self.sessions.find_by_id(session_id).await?;
        Ok(session.filter(|s| s.is_live(Utc::now())))
    }

    /// Bumps the engagement marker for a session by ID.
    pub async fn touch(&self, session_id: Uuid) -> AppResult<()> {
        self.sessions.touch_by_id(session_id, Utc::now()).await
    }

    /// Revokes a session by ID (logout from the session's own device).
    /// Returns `false` if the session was already gone.
    pub async fn revoke_session_by_id(
        &self,
        session_id: Uuid,
        reason: RevocationReason,
    ) -> AppResult<bool> {
        let session = match self.sessions.find_by_id(session_id).await? {
            Some(session) if session.is_live(Utc::now()) => session,
            _ => return Ok(false),
        };
        self.teardown(&session, reason).await?;
        Ok(true)
    }

    /// All live sessions for a user.
    pub async fn get_active_sessions(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        self.sessions.find_active_by_user(user_id, Utc::now()).await
    }

    /// Number of live sessions for a user.
    pub async fn count_active_sessions(&self, user_id: Uuid) -> AppResult<u64> {
        self.sessions.count_active_by_user(user_id, Utc::now()).await
    }

    /// Bumps the engagement marker on each authenticated request.
    /// `expires_at` is fixed at creation; this never extends a session.
    pub async fn update_activity(&self, token_hash: &str) -> AppResult<()> {
        self.sessions.touch_activity(token_hash, Utc::now()).await
    }

    /// Rebinds a session to a rotated refresh token hash.
    pub async fn rebind_token(&self, old_hash: &str, new_hash: &str) -> AppResult<()> {
        let rebound = self
            .sessions
            .rebind_token_hash(old_hash, new_hash, Utc::now())
            .await?;
        if rebound.is_none() {
            // The refresh token verified but no live session carries its
            // hash (an evicted-then-raced login). Nothing to rebind.
            warn!("Rotation rebound no session for rotated token");
        }
        Ok(())
    }

    /// Revokes the session bound to a token hash (single-device logout).
    /// Returns `false` if no live session carries the hash.
    pub async fn revoke_session(
        &self,
        token_hash: &str,
        reason: RevocationReason,
    ) -> AppResult<bool> {
        let session = match self.sessions.find_by_token_hash(token_hash).await? {
            Some(session) if session.is_live(Utc::now()) => session,
            _ => return Ok(false),
        };
        self.teardown(&session, reason).await?;
        Ok(true)
    }

    /// Revokes every live session for a user. Returns how many.
    pub async fn revoke_all_user_sessions(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
    ) -> AppResult<u64> {
        let now = Utc::now();
        let deactivated = self
            .sessions
            .deactivate_all_for_user(user_id, reason, now)
            .await?;

        for session in &deactivated {
            self.revocations
                .revoke(&session.token_hash, user_id, reason, session.expires_at)
                .await?;
        }

        info!(%user_id, count = deactivated.len(), %reason, "Revoked all user sessions");
        Ok(deactivated.len() as u64)
    }

    /// Deactivates a session and revokes its bound token hash.
    async fn teardown(&self, session: &Session, reason: RevocationReason) -> AppResult<()> {
        self.revocations
            .revoke(
                &session.token_hash,
                session.user_id,
                reason,
                session.expires_at,
            )
            .await?;
        self.sessions.deactivate(session.id, reason).await?;
        Ok(())
    }
}
