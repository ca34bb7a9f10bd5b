//! Token pair issuance with device binding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use movebase_core::config::auth::AuthConfig;
use movebase_core::error::AppError;
use movebase_entity::account::Role;
use movebase_entity::token::{TokenKind, TokenShadow};
use movebase_store::repositories::TokenShadowRepository;

use super::claims::Claims;
use super::fingerprint::FingerprintHasher;
use super::hash_token;

/// Result of a successful token pair issuance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Device fingerprint embedded in both tokens.
    pub fingerprint: String,
    /// Hash of the refresh token, for session binding.
    pub refresh_token_hash: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Creates signed JWT access and refresh tokens bound to a device
/// fingerprint, recording a server-side shadow for each.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Fingerprint hasher.
    fingerprints: FingerprintHasher,
    /// Shadow store for "revoke everything" enumeration.
    shadows: Arc<TokenShadowRepository>,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig, shadows: Arc<TokenShadowRepository>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            fingerprints: FingerprintHasher::new(config.fingerprint_secret.clone()),
            shadows,
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
        }
    }

    /// Generates an access + refresh token pair for the given account
    /// and session, bound to the requesting device context.
    pub async fn issue_pair(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        role: Role,
        email: &str,
        user_agent: Option<&str>,
        ip_address: &str,
    ) -> Result<IssuedPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::hours(self.refresh_ttl_hours);
        let fingerprint = self.fingerprints.compute(user_agent, ip_address);

        let access_claims = Claims {
            sub: user_id,
            sid: session_id,
            role,
            email: email.to_string(),
            fp: fingerprint.clone(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenKind::Access,
        };

        let refresh_claims = Claims {
            sub: user_id,
            sid: session_id,
            role,
            email: email.to_string(),
            fp: fingerprint.clone(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenKind::Refresh,
        };

        let access_token = encode(&Header::default(), &access_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        let refresh_token_hash = hash_token(&refresh_token);

        self.shadows
            .record(TokenShadow {
                token_hash: hash_token(&access_token),
                user_id,
                fingerprint: fingerprint.clone(),
                kind: TokenKind::Access,
                issued_at: now,
                expires_at: access_exp,
            })
            .await?;

        self.shadows
            .record(TokenShadow {
                token_hash: refresh_token_hash.clone(),
                user_id,
                fingerprint: fingerprint.clone(),
                kind: TokenKind::Refresh,
                issued_at: now,
                expires_at: refresh_exp,
            })
            .await?;

        Ok(IssuedPair {
            access_token,
            refresh_token,
            fingerprint,
            refresh_token_hash,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }
}
