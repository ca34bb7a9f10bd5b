//! Request deadline enforcement.
//!
//! Every suspension point in a handler is a store call; this caps any
//! chain of them with one budget. Writes that complete after the budget
//! has expired are not rolled back — the caller gets a timeout and the
//! late write stands, which is the documented trade for not holding
//! transactions open across the whole request.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use movebase_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Aborts the request with a timeout error when processing exceeds the
/// configured budget.
pub async fn request_deadline(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let budget = Duration::from_secs(state.config.server.request_timeout_seconds);
    let path = request.uri().path().to_string();

    match tokio::time::timeout(budget, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, budget_seconds = budget.as_secs(), "Request exceeded deadline");
            ApiError(AppError::timeout("Request processing exceeded deadline")).into_response()
        }
    }
}
