//! JWT token issuance, verification, and rotation.

pub mod claims;
pub mod encoder;
pub mod fingerprint;
pub mod rotation;
pub mod verifier;

pub use claims::{Claims, Identity};
pub use encoder::{IssuedPair, TokenIssuer};
pub use fingerprint::FingerprintHasher;
pub use rotation::TokenRotator;
pub use verifier::TokenVerifier;

use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of a bearer token, hex-encoded.
///
/// This is the only form of a token the engine ever persists, in
/// shadows, sessions, and the revocation registry alike.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
