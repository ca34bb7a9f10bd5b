//! CSRF guard configuration.

use serde::{Deserialize, Serialize};

/// CSRF double-submit guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfConfig {
    /// HMAC secret for token encoding.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Freshness window for encoded tokens in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Request header carrying the submitted token.
    #[serde(default = "default_header_name")]
    pub header_name: String,
    /// Cookie holding the double-submit counterpart.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_hours: default_token_ttl(),
            header_name: default_header_name(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_secret() -> String {
    "CHANGE_ME_CSRF_SECRET".to_string()
}

fn default_token_ttl() -> u64 {
    24
}

fn default_header_name() -> String {
    "x-csrf-token".to_string()
}

fn default_cookie_name() -> String {
    "mb_csrf".to_string()
}
