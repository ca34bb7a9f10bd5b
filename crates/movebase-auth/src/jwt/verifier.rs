//! Token verification: signature, expiry, revocation, device binding.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use movebase_core::config::auth::AuthConfig;
use movebase_core::result::AppResult;
use movebase_entity::token::TokenKind;

use crate::revocation::RevocationRegistry;

use super::claims::Claims;
use super::fingerprint::FingerprintHasher;
use super::hash_token;

/// Validates JWT tokens against signature, expiry, the revocation
/// registry, and the requesting device's fingerprint, in that order.
///
/// Every expected failure returns `Ok(None)`; the causes are logged but
/// deliberately not distinguished in the result, so callers cannot be
/// turned into an oracle for why a token failed. Only store
/// unavailability is an `Err`.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Fingerprint hasher.
    fingerprints: FingerprintHasher,
    /// Revocation registry.
    revocations: Arc<RevocationRegistry>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig, revocations: Arc<RevocationRegistry>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            fingerprints: FingerprintHasher::new(config.fingerprint_secret.clone()),
            revocations,
        }
    }

    /// Verifies an access token against the current request context.
    pub async fn verify_access(
        &self,
        token: &str,
        user_agent: Option<&str>,
        ip_address: &str,
    ) -> AppResult<Option<Claims>> {
        self.verify(token, TokenKind::Access, user_agent, ip_address)
            .await
    }

    /// Verifies a refresh token against the current request context.
    pub async fn verify_refresh(
        &self,
        token: &str,
        user_agent: Option<&str>,
        ip_address: &str,
    ) -> AppResult<Option<Claims>> {
        self.verify(token, TokenKind::Refresh, user_agent, ip_address)
            .await
    }

    async fn verify(
        &self,
        token: &str,
        expected_kind: TokenKind,
        user_agent: Option<&str>,
        ip_address: &str,
    ) -> AppResult<Option<Claims>> {
        // 1. Signature and expiry.
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(error = %e, "Token failed signature/expiry validation");
                return Ok(None);
            }
        };

        if claims.token_type != expected_kind {
            debug!("Token kind mismatch");
            return Ok(None);
        }

        // 2. Revocation registry: the authoritative override.
        if self.revocations.is_revoked(&hash_token(token)).await? {
            debug!(user_id = %claims.sub, "Token is revoked");
            return Ok(None);
        }

        // 3. Device binding. Recomputed from the *current* request
        // context: a replay from another device or network recomputes
        // to a different value even though the signature is fine.
        let expected_fp = self.fingerprints.compute(user_agent, ip_address);
        if claims.fp != expected_fp {
            debug!(user_id = %claims.sub, "Token fingerprint mismatch");
            return Ok(None);
        }

        Ok(Some(claims))
    }
}
