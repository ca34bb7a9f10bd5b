//! HMAC-encoded double-submit CSRF guard.
//!
//! Tokens are never persisted server-side: validity is reconstructed
//! entirely from the encoded form `token:timestamp:hmac`, where the HMAC
//! covers `token:timestamp` under the configured secret. A token is
//! valid only if the HMAC verifies *and* the timestamp falls within the
//! freshness window.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use movebase_core::config::csrf::CsrfConfig;
use movebase_core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies encoded CSRF tokens.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    secret: String,
    ttl_seconds: i64,
    allowed_origins: Vec<String>,
}

impl CsrfGuard {
    /// Creates a guard from configuration plus the server's origin
    /// allow-list.
    pub fn new(config: &CsrfConfig, allowed_origins: Vec<String>) -> Self {
        Self {
            secret: config.secret.clone(),
            ttl_seconds: (config.token_ttl_hours * 3600) as i64,
            allowed_origins,
        }
    }

    /// Generates a fresh random token: 32 bytes, URL-safe base64.
    pub fn generate_token(&self) -> String {
        let bytes: [u8; 32] = rand::random();
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Encodes a token as `token:timestamp:hmac`.
    pub fn encode(&self, token: &str) -> Result<String, AppError> {
        let timestamp = Utc::now().timestamp();
        let tag = self.sign(token, timestamp)?;
        Ok(format!("{token}:{timestamp}:{tag}"))
    }

    /// Verifies an encoded token: HMAC in constant time, then freshness.
    pub fn verify(&self, encoded: &str) -> bool {
        let mut parts = encoded.rsplitn(3, ':');
        let (Some(tag), Some(ts_str), Some(token)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(timestamp) = ts_str.parse::<i64>() else {
            return false;
        };

        let Ok(expected) = self.sign(token, timestamp) else {
            return false;
        };
        if !constant_time_eq(tag, &expected) {
            return false;
        }

        let age = Utc::now().timestamp() - timestamp;
        (0..=self.ttl_seconds).contains(&age)
    }

    /// The double-submit check: the header and cookie must be the exact
    /// same encoded token, and that token must itself verify.
    pub fn verify_double_submit(&self, header_value: &str, cookie_value: &str) -> bool {
        constant_time_eq(header_value, cookie_value) && self.verify(header_value)
    }

    /// Advisory Origin/Referer check. A mismatch is logged as a signal
    /// but the double-submit comparison stays authoritative: proxies and
    /// privacy tooling strip these headers too often to deny on absence.
    pub fn origin_allowed(&self, origin: Option<&str>, referer: Option<&str>) -> bool {
        let Some(value) = origin.or(referer) else {
            return true;
        };
        let allowed = self
            .allowed_origins
            .iter()
            .any(|allowed| value.starts_with(allowed.as_str()));
        if !allowed {
            warn!(origin = %value, "Request origin not in allow-list");
        }
        allowed
    }

    fn sign(&self, token: &str, timestamp: i64) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::internal(format!("CSRF HMAC init failed: {e}")))?;
        mac.update(token.as_bytes());
        mac.update(b":");
        mac.update(timestamp.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
