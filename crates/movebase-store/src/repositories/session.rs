//! Session repository.
//!
//! Serves the query surface the session registry needs: active-by-user
//! scans, oldest-by-activity selection for cap eviction, and token-hash
//! lookup for activity touches and revocation.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use movebase_core::result::AppResult;
use movebase_entity::token::RevocationReason;
use movebase_entity::Session;

/// Sessions keyed by ID with a token-hash lookup index.
#[derive(Debug, Default)]
pub struct SessionRepository {
    sessions: DashMap<Uuid, Session>,
    by_token_hash: DashMap<String, Uuid>,
}

impl SessionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session record.
    pub async fn create(&self, session: Session) -> AppResult<Session> {
        self.by_token_hash
            .insert(session.token_hash.clone(), session.id);
        self.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.sessions.get(&id).map(|s| s.value().clone()))
    }

    /// Find a session by its bound token hash.
    pub async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        let id = self.by_token_hash.get(token_hash).map(|id| *id);
        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// All live sessions for a user, ordered by creation time.
    pub async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_live(now))
            .map(|s| s.value().clone())
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }

    /// Count of live sessions for a user.
    pub async fn count_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_live(now))
            .count() as u64)
    }

    /// The live session with the least-recent activity for a user.
    /// Activity ties are broken by creation order, oldest first.
    pub async fn find_oldest_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_live(now))
            .map(|s| s.value().clone())
            .min_by_key(|s| (s.last_activity, s.created_at)))
    }

    /// Bump `last_activity` on the session bound to `token_hash`.
    pub async fn touch_activity(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(id) = self.by_token_hash.get(token_hash).map(|id| *id) {
            self.touch_by_id(id, now).await?;
        }
        Ok(())
    }

    /// Bump `last_activity` on a session by ID.
    pub async fn touch_by_id(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            let updated = session.with_activity(now);
            *session = updated;
        }
        Ok(())
    }

    /// Deactivate a session by ID. Returns the updated record if it was live.
    pub async fn deactivate(
        &self,
        id: Uuid,
        reason: RevocationReason,
    ) -> AppResult<Option<Session>> {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            if session.is_active {
                let updated = session.deactivated(reason);
                *session = updated.clone();
                return Ok(Some(updated));
            }
        }
        Ok(None)
    }

    /// Deactivate every live session for a user. Returns the records
    /// deactivated by this call.
    pub async fn deactivate_all_for_user(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Session>> {
        let ids: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_live(now))
            .map(|s| s.id)
            .collect();

        let mut deactivated = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(session) = self.deactivate(id, reason).await? {
                deactivated.push(session);
            }
        }
        Ok(deactivated)
    }

    /// Rebind a session from its old token hash to a new one (refresh
    /// rotation), bumping activity. Returns the updated record.
    pub async fn rebind_token_hash(
        &self,
        old_hash: &str,
        new_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        let id = match self.by_token_hash.remove(old_hash) {
            Some((_, id)) => id,
            None => return Ok(None),
        };
        self.by_token_hash.insert(new_hash.to_string(), id);
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.token_hash = new_hash.to_string();
            session.last_activity = now;
            return Ok(Some(session.value().clone()));
        }
        Ok(None)
    }

    /// Sessions still marked active whose absolute expiry has passed.
    pub async fn find_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<Session>> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.is_active && s.expires_at <= now)
            .map(|s| s.value().clone())
            .collect())
    }
}
