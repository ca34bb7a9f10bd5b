//! CSRF token issuance.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};

use movebase_core::error::AppError;

use crate::dto::response::{ApiResponse, CsrfResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/auth/csrf — issues an encoded CSRF token.
///
/// The same encoded value goes out twice: in the response body for the
/// client to echo in the request header, and as a same-site cookie for
/// the double-submit comparison. The cookie is deliberately not
/// HttpOnly; single-page clients read it to populate the header.
pub async fn issue_token(State(state): State<AppState>) -> Result<Response, ApiError> {
    let token = state.csrf.generate_token();
    let encoded = state.csrf.encode(&token)?;

    let cookie = format!(
        "{}={}; Path=/; SameSite=Strict; Max-Age={}",
        state.config.csrf.cookie_name,
        encoded,
        state.config.csrf.token_ttl_hours * 3600,
    );
    let cookie_value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::internal(format!("CSRF cookie encoding failed: {e}")))?;

    let mut response =
        Json(ApiResponse::ok(CsrfResponse { token: encoded })).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie_value);
    Ok(response)
}
