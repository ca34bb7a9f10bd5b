//! Server-side token shadows and revocation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}

/// Why a token hash was revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    /// User-initiated logout.
    Logout,
    /// Administrative revocation.
    Revoked,
    /// Natural expiry observed at teardown.
    Expired,
    /// Security incident response ("log out everywhere").
    Security,
    /// Refresh token consumed by rotation.
    Rotated,
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Logout => "logout",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
            Self::Security => "security",
            Self::Rotated => "rotated",
        };
        write!(f, "{s}")
    }
}

/// Server-side shadow of an issued token.
///
/// Only the hash is retained; the bearer value lives exclusively with the
/// client. Shadows let "revoke everything for this user" enumerate live
/// token hashes without ever holding the tokens themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenShadow {
    /// SHA-256 hash of the bearer token, hex-encoded.
    pub token_hash: String,
    /// Owning account.
    pub user_id: Uuid,
    /// Device fingerprint embedded in the token.
    pub fingerprint: String,
    /// Access or refresh.
    pub kind: TokenKind,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// The token's natural expiry.
    pub expires_at: DateTime<Utc>,
}

/// A revocation registry entry, stored keyed by token hash with a TTL
/// mirroring the token's natural expiry so the registry is self-bounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Owning account.
    pub user_id: Uuid,
    /// Why the token was killed.
    pub reason: RevocationReason,
    /// The underlying token's natural expiry.
    pub expires_at: DateTime<Utc>,
}
