//! # movebase-auth
//!
//! The MoveBase security engine: every protected request on the platform
//! passes through the verdicts produced here.
//!
//! ## Modules
//!
//! - `jwt` — token pair issuance, verification, and rotation bound to a
//!   device fingerprint
//! - `password` — Argon2id hashing, strength policy, reuse history
//! - `revocation` — authoritative kill-switch for token hashes
//! - `session` — per-user device sessions with a concurrency cap
//! - `csrf` — HMAC-encoded double-submit CSRF guard
//! - `rate` — per-key token-bucket rate limiting with a burst bucket
//! - `rbac` — role/ownership permission decisions
//! - `sanitize` — the untrusted-input trust boundary
//! - `audit` — append-only audit emission

pub mod audit;
pub mod csrf;
pub mod jwt;
pub mod password;
pub mod rate;
pub mod rbac;
pub mod revocation;
pub mod sanitize;
pub mod session;

pub use audit::{AuditRecorder, AuditSink};
pub use csrf::CsrfGuard;
pub use jwt::{Claims, Identity, TokenIssuer, TokenRotator, TokenVerifier};
pub use password::{CredentialService, PasswordHasher, PasswordPolicy};
pub use rate::{RateDecision, RateLimiter};
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
pub use revocation::RevocationRegistry;
pub use session::{SessionCleanup, SessionRegistry};
