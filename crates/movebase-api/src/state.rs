//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use movebase_auth::audit::{AuditRecorder, AuditSink};
use movebase_auth::csrf::CsrfGuard;
use movebase_auth::jwt::{TokenIssuer, TokenRotator, TokenVerifier};
use movebase_auth::password::CredentialService;
use movebase_auth::rate::RateLimiter;
use movebase_auth::rbac::RbacEnforcer;
use movebase_auth::revocation::RevocationRegistry;
use movebase_auth::session::{SessionCleanup, SessionRegistry};
use movebase_core::config::AppConfig;
use movebase_core::traits::KeyValueStore;
use movebase_store::repositories::{
    AccountRepository, CredentialRepository, SessionRepository, TokenShadowRepository,
};

/// Application state containing all shared dependencies.
///
/// Constructed exactly once at startup; every handler and middleware
/// receives injected handles from here rather than reaching into any
/// global registry. All fields are `Arc`-wrapped for cheap cloning
/// across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Repositories ─────────────────────────────────────────
    /// Account repository.
    pub accounts: Arc<AccountRepository>,

    // ── Engine ───────────────────────────────────────────────
    /// Credential lifecycle (hashing, policy, lockout).
    pub credentials: Arc<CredentialService>,
    /// Token pair issuance.
    pub token_issuer: Arc<TokenIssuer>,
    /// Token verification.
    pub token_verifier: Arc<TokenVerifier>,
    /// Refresh token rotation.
    pub token_rotator: Arc<TokenRotator>,
    /// Revocation registry.
    pub revocations: Arc<RevocationRegistry>,
    /// Session registry.
    pub sessions: Arc<SessionRegistry>,
    /// Session sweep handler.
    pub session_cleanup: Arc<SessionCleanup>,
    /// Permission enforcement.
    pub rbac: Arc<RbacEnforcer>,
    /// CSRF guard.
    pub csrf: Arc<CsrfGuard>,
    /// Rate limiter.
    pub rate_limiter: Arc<RateLimiter>,
    /// Audit recorder.
    pub audit: Arc<AuditRecorder>,
}

impl AppState {
    /// Wires the full engine over the given key/value store and audit
    /// sink. This is the single initialization point: no component looks
    /// anything up at call time.
    pub fn build(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        audit_sink: Arc<dyn AuditSink>,
    ) -> Self {
        let accounts = Arc::new(AccountRepository::new());
        let credential_repo = Arc::new(CredentialRepository::new());
        let session_repo = Arc::new(SessionRepository::new());
        let shadow_repo = Arc::new(TokenShadowRepository::new());

        let revocations = Arc::new(RevocationRegistry::new(store, shadow_repo.clone()));
        let sessions = Arc::new(SessionRegistry::new(
            session_repo.clone(),
            revocations.clone(),
            config.session.clone(),
        ));
        let session_cleanup = Arc::new(SessionCleanup::new(session_repo, shadow_repo.clone()));

        let credentials = Arc::new(CredentialService::new(&config.auth, credential_repo));
        let token_issuer = Arc::new(TokenIssuer::new(&config.auth, shadow_repo));
        let token_verifier = Arc::new(TokenVerifier::new(&config.auth, revocations.clone()));
        let token_rotator = Arc::new(TokenRotator::new(
            token_verifier.clone(),
            token_issuer.clone(),
            revocations.clone(),
            sessions.clone(),
        ));

        let csrf = Arc::new(CsrfGuard::new(
            &config.csrf,
            config.server.allowed_origins.clone(),
        ));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        let rbac = Arc::new(RbacEnforcer::new());
        let audit = Arc::new(AuditRecorder::new(audit_sink));

        Self {
            config: Arc::new(config),
            accounts,
            credentials,
            token_issuer,
            token_verifier,
            token_rotator,
            revocations,
            sessions,
            session_cleanup,
            rbac,
            csrf,
            rate_limiter,
            audit,
        }
    }
}
