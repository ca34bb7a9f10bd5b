//! Identity extractors — bearer token resolution into request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use movebase_auth::jwt::{Claims, Identity};
use movebase_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated identity, required.
///
/// Resolution failure of any kind (missing header, malformed token,
/// expired, revoked, fingerprint mismatch, dead session) converts to a
/// single undifferentiated 401 at this boundary.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Resolved identity.
    pub identity: Identity,
    /// Full claims for lifecycle handlers (logout needs jti context).
    pub claims: Claims,
    /// The raw bearer token as presented.
    pub token: String,
}

/// Extracted identity for routes that serve anonymous callers too.
/// Resolution failure leaves `None` rather than rejecting.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

async fn resolve(parts: &mut Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(token) = bearer_token(parts) else {
        return Ok(None);
    };

    let client = crate::extractors::ClientInfo::from_headers(&parts.headers);
    let claims = match state
        .token_verifier
        .verify_access(&token, client.user_agent(), &client.ip_address)
        .await?
    {
        Some(claims) => claims,
        None => return Ok(None),
    };

    // The token verified, but its session must still be live: eviction
    // and admin revocation cut off access tokens here.
    if state.sessions.validate(claims.session_id()).await?.is_none() {
        return Ok(None);
    }

    // Engagement marker only; expiry stays fixed at creation.
    state.sessions.touch(claims.session_id()).await?;

    Ok(Some(AuthUser {
        identity: Identity::from(&claims),
        claims,
        token,
    }))
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await? {
            Some(user) => Ok(user),
            None => Err(ApiError(AppError::authentication("Authentication required"))),
        }
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve(parts, state).await?))
    }
}
