//! Token bucket rate limiter middleware.

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use movebase_auth::rate::{RateDecision, resolve_rate_key};
use movebase_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::ClientInfo;
use crate::state::AppState;

/// Admits or denies the request against the per-key buckets before any
/// identity resolution happens. The key prefers an API-key credential,
/// then the bearer token, then the client IP.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.rate_limiter.is_bypassed(request.uri().path()) {
        return next.run(request).await;
    }

    let headers = request.headers();
    let api_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let client = ClientInfo::from_headers(headers);

    let key = resolve_rate_key(api_key, bearer, &client.ip_address);

    match state.rate_limiter.check(&key).await {
        RateDecision::Allowed => next.run(request).await,
        RateDecision::Denied { retry_after } => {
            let secs = retry_after.as_secs().max(1);
            let mut response =
                ApiError(AppError::rate_limit("Too many requests")).into_response();
            response.headers_mut().insert(
                "retry-after",
                HeaderValue::from_str(&secs.to_string())
                    .unwrap_or_else(|_| HeaderValue::from_static("1")),
            );
            response
        }
    }
}
