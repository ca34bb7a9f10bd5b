//! JWT claims structure used in access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use movebase_entity::account::Role;
use movebase_entity::token::TokenKind;

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Session this token belongs to.
    pub sid: Uuid,
    /// Account role at the time of token issuance.
    pub role: Role,
    /// Account email for convenience.
    pub email: String,
    /// Device fingerprint the token is bound to.
    pub fp: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID.
    pub jti: Uuid,
    /// Token type: access or refresh.
    pub token_type: TokenKind,
}

impl Claims {
    /// Returns the session ID.
    pub fn session_id(&self) -> Uuid {
        self.sid
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// The identity a successfully verified token resolves to.
///
/// This is what gets attached to request context and fed to the
/// permission engine; absence of an `Identity` is the anonymous state,
/// not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Authenticated account ID.
    pub user_id: Uuid,
    /// Role at token issuance.
    pub role: Role,
    /// Account email.
    pub email: String,
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            email: claims.email.clone(),
        }
    }
}
