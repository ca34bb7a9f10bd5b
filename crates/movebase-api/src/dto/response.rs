//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use movebase_entity::Session;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login / refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Identity attached to the authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// Account ID.
    pub user_id: Uuid,
    /// Role.
    pub role: String,
    /// Email.
    pub email: String,
}

/// One active session in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session ID.
    pub id: Uuid,
    /// Client IP at login.
    pub ip_address: String,
    /// Client user agent at login.
    pub user_agent: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last authenticated activity.
    pub last_activity: DateTime<Utc>,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            ip_address: session.ip_address.clone(),
            user_agent: session.user_agent.clone(),
            created_at: session.created_at,
            last_activity: session.last_activity,
            expires_at: session.expires_at,
        }
    }
}

/// CSRF token issuance response. The same encoded value is also set as
/// the double-submit cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfResponse {
    /// Encoded CSRF token for the request header.
    pub token: String,
}

/// Password validation verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCheckResponse {
    /// Whether the candidate passed every rule.
    pub is_valid: bool,
    /// Every rule the candidate failed.
    pub errors: Vec<String>,
}

/// Count of revoked sessions/tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedResponse {
    /// Sessions deactivated.
    pub sessions_revoked: u64,
    /// Tokens newly revoked.
    pub tokens_revoked: u64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the store answers.
    pub store: String,
}
