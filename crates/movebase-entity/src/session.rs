//! Session record: one logged-in device for one account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::token::RevocationReason;

/// Device context captured at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device fingerprint bound into the session's tokens.
    pub fingerprint: String,
    /// Client IP address as observed at login.
    pub ip_address: String,
    /// Client user agent, when supplied.
    pub user_agent: Option<String>,
}

/// A logged-in device session.
///
/// `expires_at` is fixed at creation; `last_activity` is an engagement
/// marker used for eviction ordering, not a sliding expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Owning account.
    pub user_id: Uuid,
    /// Hash of the refresh token bound to this session. The bearer value
    /// itself is never persisted.
    pub token_hash: String,
    /// Device fingerprint.
    pub device_fingerprint: String,
    /// Client IP address at login.
    pub ip_address: String,
    /// Client user agent at login.
    pub user_agent: Option<String>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Last authenticated activity on this session.
    pub last_activity: DateTime<Utc>,
    /// Whether the session is live.
    pub is_active: bool,
    /// Absolute expiry, fixed at creation.
    pub expires_at: DateTime<Utc>,
    /// Why the session was deactivated, when it was.
    pub revoked_reason: Option<RevocationReason>,
}

impl Session {
    /// Create a new active session. The ID is chosen by the caller so it
    /// can be embedded in token claims issued alongside the session.
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        token_hash: impl Into<String>,
        device: DeviceInfo,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            token_hash: token_hash.into(),
            device_fingerprint: device.fingerprint,
            ip_address: device.ip_address,
            user_agent: device.user_agent,
            created_at: now,
            last_activity: now,
            is_active: true,
            expires_at,
            revoked_reason: None,
        }
    }

    /// Whether the session counts as active at `now`: live and unexpired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }

    /// Return a new record with activity bumped to `now`.
    pub fn with_activity(&self, now: DateTime<Utc>) -> Self {
        Self {
            last_activity: now,
            ..self.clone()
        }
    }

    /// Return a new deactivated record.
    pub fn deactivated(&self, reason: RevocationReason) -> Self {
        Self {
            is_active: false,
            revoked_reason: Some(reason),
            ..self.clone()
        }
    }
}
