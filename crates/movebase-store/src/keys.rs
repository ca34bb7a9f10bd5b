//! Store key builders for MoveBase key/value entries.
//!
//! Centralising key construction prevents typos and makes it easy to
//! find every key the engine writes. Only the revocation registry lives
//! in the key/value store; records with richer query needs (sessions,
//! credentials, shadows) live behind repositories.

/// Prefix applied to all MoveBase store keys.
const PREFIX: &str = "movebase";

/// Key for a revocation entry by token hash.
pub fn revoked_token(token_hash: &str) -> String {
    format!("{PREFIX}:revoked:{token_hash}")
}
