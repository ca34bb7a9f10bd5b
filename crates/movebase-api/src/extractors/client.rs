//! Client context extraction: IP address and user agent.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// The device/network context the engine fingerprints against.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client IP address: first `x-forwarded-for` hop, else `x-real-ip`,
    /// else `"unknown"` (the engine sits behind the platform proxy,
    /// which injects these headers).
    pub ip_address: String,
    /// Client user agent, when supplied.
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Reads client context out of request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| {
                headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
            })
            .unwrap_or("unknown")
            .to_string();

        let user_agent = headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Self {
            ip_address,
            user_agent,
        }
    }

    /// User agent as a borrowed option.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
