//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Secret mixed into the device fingerprint hash. Kept separate from
    /// the signing key so rotating one does not invalidate the other.
    #[serde(default = "default_fingerprint_secret")]
    pub fingerprint_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Number of previous password hashes retained for reuse rejection.
    #[serde(default = "default_history_depth")]
    pub password_history_depth: usize,
    /// Maximum failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: u32,
    /// Account lockout duration in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            fingerprint_secret: default_fingerprint_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            password_history_depth: default_history_depth(),
            max_failed_attempts: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_fingerprint_secret() -> String {
    "CHANGE_ME_TOO_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_password_min() -> usize {
    8
}

fn default_history_depth() -> usize {
    5
}

fn default_max_failed() -> u32 {
    5
}

fn default_lockout() -> u64 {
    30
}
