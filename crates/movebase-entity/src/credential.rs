//! Credential record: password hash, reuse history, lockout state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored credential material for one account.
///
/// The plaintext password never appears here; only argon2 hashes. The
/// history holds the most recent previous hashes (bounded FIFO) so a
/// password change can reject reuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Owning account.
    pub user_id: Uuid,
    /// Current argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Previous password hashes, oldest first.
    #[serde(skip_serializing)]
    pub password_history: Vec<String>,
    /// When the password was last changed.
    pub last_changed_at: DateTime<Utc>,
    /// Consecutive failed login attempts since the last success.
    pub failed_attempts: u32,
    /// Account locked until this time, if a lockout is in effect.
    pub locked_until: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential for a freshly registered account.
    pub fn new(user_id: Uuid, password_hash: String) -> Self {
        Self {
            user_id,
            password_hash,
            password_history: Vec::new(),
            last_changed_at: Utc::now(),
            failed_attempts: 0,
            locked_until: None,
        }
    }

    /// Check whether a lockout is currently in effect.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }

    /// Return a new record with the password rotated and the old hash
    /// pushed into the history, trimming the history to `depth` entries.
    pub fn with_rotated_password(&self, new_hash: String, depth: usize) -> Self {
        let mut history = self.password_history.clone();
        history.push(self.password_hash.clone());
        while history.len() > depth {
            history.remove(0);
        }
        Self {
            user_id: self.user_id,
            password_hash: new_hash,
            password_history: history,
            last_changed_at: Utc::now(),
            failed_attempts: self.failed_attempts,
            locked_until: self.locked_until,
        }
    }

    /// Return a new record with one more failed attempt recorded, locking
    /// until `locked_until` when the caller decides the threshold is hit.
    pub fn with_failed_attempt(&self, locked_until: Option<DateTime<Utc>>) -> Self {
        Self {
            failed_attempts: self.failed_attempts + 1,
            locked_until: locked_until.or(self.locked_until),
            ..self.clone()
        }
    }

    /// Return a new record with the failure counter and lockout cleared.
    pub fn with_attempts_reset(&self) -> Self {
        Self {
            failed_attempts: 0,
            locked_until: None,
            ..self.clone()
        }
    }
}
