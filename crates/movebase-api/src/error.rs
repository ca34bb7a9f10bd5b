//! Maps domain `AppError` to HTTP responses.
//!
//! Expected failures map to their taxonomy status codes with their
//! message intact. Infrastructure faults are logged once here with full
//! internal detail and leave the process as a generic message plus a
//! correlation id — stack traces, internal field names, and cause
//! detail never reach the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use movebase_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Correlation id for reporting internal faults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

/// Newtype carrying `AppError` across the Axum boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::RateLimit => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            ErrorKind::Timeout => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Store | ErrorKind::Configuration | ErrorKind::Internal => {
                let correlation_id = Uuid::new_v4();
                tracing::error!(
                    %correlation_id,
                    kind = %err.kind,
                    error = %err.message,
                    source = ?err.source,
                    "Internal server error"
                );
                let body = ApiErrorResponse {
                    error: "INTERNAL_ERROR".to_string(),
                    message: "An internal error occurred".to_string(),
                    correlation_id: Some(correlation_id),
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
            correlation_id: None,
        };

        (status, Json(body)).into_response()
    }
}
