//! Double-submit CSRF middleware.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use movebase_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Enforces the double-submit check on state-changing methods.
///
/// `GET`/`HEAD`/`OPTIONS` are exempt. Everything else must present the
/// encoded token in the configured header, matching the configured
/// cookie exactly. Origin/Referer are checked against the allow-list as
/// an advisory signal only: the guard logs mismatches but the
/// double-submit comparison decides.
pub async fn csrf_protect(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return next.run(request).await;
    }

    let headers = request.headers();
    let config = &state.config.csrf;

    let origin = headers.get("origin").and_then(|v| v.to_str().ok());
    let referer = headers.get("referer").and_then(|v| v.to_str().ok());
    state.csrf.origin_allowed(origin, referer);

    let header_value = headers
        .get(config.header_name.as_str())
        .and_then(|v| v.to_str().ok());
    let cookie_value = cookie(headers, &config.cookie_name);

    let ok = match (header_value, cookie_value.as_deref()) {
        (Some(header), Some(cookie)) => state.csrf.verify_double_submit(header, cookie),
        _ => false,
    };

    if !ok {
        return ApiError(AppError::authorization("CSRF token missing or invalid"))
            .into_response();
    }

    next.run(request).await
}

/// Pulls one cookie value out of the `Cookie` header.
fn cookie(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get("cookie")?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
