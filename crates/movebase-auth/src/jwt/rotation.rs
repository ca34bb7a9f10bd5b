//! Refresh token rotation.
//!
//! Rotation is the engine's critical section: the old refresh token must
//! be dead before the new pair exists anywhere. The registry claim is an
//! atomic set-if-absent and is awaited before issuance, so of two
//! near-simultaneous rotations of the same stale token at most one wins
//! and the other observes the claim and fails closed.
//!
//! Caveat: with a multi-replica store whose writes are not immediately
//! visible everywhere, a second rotation racing inside the store's own
//! visibility window could still slip through. That window is the
//! store's guarantee, not ours; we do not promise strict exactly-once
//! beyond it.

use std::sync::Arc;

use tracing::{info, warn};

use movebase_core::result::AppResult;
use movebase_entity::token::RevocationReason;

use crate::revocation::RevocationRegistry;
use crate::session::SessionRegistry;

use super::encoder::{IssuedPair, TokenIssuer};
use super::hash_token;
use super::verifier::TokenVerifier;

/// Rotates refresh tokens: one new pair per old token, ever.
#[derive(Debug, Clone)]
pub struct TokenRotator {
    verifier: Arc<TokenVerifier>,
    issuer: Arc<TokenIssuer>,
    revocations: Arc<RevocationRegistry>,
    sessions: Arc<SessionRegistry>,
}

impl TokenRotator {
    /// Creates a new rotator.
    pub fn new(
        verifier: Arc<TokenVerifier>,
        issuer: Arc<TokenIssuer>,
        revocations: Arc<RevocationRegistry>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            verifier,
            issuer,
            revocations,
            sessions,
        }
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// Returns `Ok(None)` for every expected failure: invalid signature,
    /// expiry, revocation, fingerprint mismatch, or losing the rotation
    /// claim to a concurrent call with the same token.
    pub async fn rotate(
        &self,
        refresh_token: &str,
        user_agent: Option<&str>,
        ip_address: &str,
    ) -> AppResult<Option<IssuedPair>> {
        let claims = match self
            .verifier
            .verify_refresh(refresh_token, user_agent, ip_address)
            .await?
        {
            Some(claims) => claims,
            None => return Ok(None),
        };

        // Kill the old token before the new pair exists. A duplicate
        // rotation with the same token loses this claim and fails.
        let old_hash = hash_token(refresh_token);
        let claimed = self
            .revocations
            .try_claim(
                &old_hash,
                claims.sub,
                RevocationReason::Rotated,
                claims.expires_at(),
            )
            .await?;

        if !claimed {
            warn!(user_id = %claims.sub, "Duplicate rotation attempt for already-rotated token");
            return Ok(None);
        }

        let pair = self
            .issuer
            .issue_pair(
                claims.sub,
                claims.sid,
                claims.role,
                &claims.email,
                user_agent,
                ip_address,
            )
            .await?;

        self.sessions
            .rebind_token(&old_hash, &pair.refresh_token_hash)
            .await?;

        info!(user_id = %claims.sub, "Refresh token rotated");
        Ok(Some(pair))
    }
}
