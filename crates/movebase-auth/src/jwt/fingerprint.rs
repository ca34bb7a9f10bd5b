//! Device fingerprinting.
//!
//! A fingerprint binds a token to the device/network context it was
//! issued for: a one-way hash over the client's user agent, IP address,
//! and a server-side secret. A cryptographically valid token replayed
//! from a different context recomputes to a different fingerprint and is
//! rejected.

use sha2::{Digest, Sha256};

/// Computes device fingerprints from request context.
#[derive(Debug, Clone)]
pub struct FingerprintHasher {
    secret: String,
}

impl FingerprintHasher {
    /// Creates a hasher with the configured fingerprint secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Computes the fingerprint for a request context.
    ///
    /// The secret keeps the mapping one-way for anyone who can observe
    /// user agent and IP but not the server configuration.
    pub fn compute(&self, user_agent: Option<&str>, ip_address: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(user_agent.unwrap_or("").as_bytes());
        hasher.update(b"|");
        hasher.update(ip_address.as_bytes());
        hasher.update(b"|");
        hasher.update(self.secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}
