//! Administrative session handlers — incident response surface.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use movebase_auth::rbac::Permission;
use movebase_auth::sanitize::sanitize_string;
use movebase_entity::audit::{AuditEntry, FieldChange};
use movebase_entity::token::RevocationReason;

use crate::dto::request::RevokeSessionsRequest;
use crate::dto::response::{ApiResponse, RevokedResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/sessions/{user_id} — list a user's active sessions.
pub async fn list_user_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SessionResponse>>>, ApiError> {
    state
        .rbac
        .require_permission(&auth.identity.role, &Permission::SessionViewAll)?;

    let sessions = state.sessions.get_active_sessions(user_id).await?;
    Ok(Json(ApiResponse::ok(
        sessions.iter().map(SessionResponse::from).collect(),
    )))
}

/// POST /api/admin/sessions/{user_id}/revoke — kill every session and
/// live token for a user (security incident response).
pub async fn revoke_user_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<RevokeSessionsRequest>,
) -> Result<Json<ApiResponse<RevokedResponse>>, ApiError> {
    state
        .rbac
        .require_permission(&auth.identity.role, &Permission::SessionRevokeAll)?;

    let sessions_revoked = state
        .sessions
        .revoke_all_user_sessions(user_id, RevocationReason::Security)
        .await?;
    let tokens_revoked = state
        .revocations
        .revoke_all_for_user(user_id, RevocationReason::Security)
        .await?;

    state
        .audit
        .record(
            AuditEntry::new(
                Some(auth.identity.user_id),
                Some(auth.identity.role),
                "admin.revoke_all_sessions",
                "session",
                Some(user_id.to_string()),
                true,
            )
            .with_changes(vec![FieldChange {
                field: "reason".to_string(),
                old: None,
                new: req
                    .reason
                    .as_deref()
                    .map(|r| serde_json::Value::String(sanitize_string(r))),
            }]),
        )
        .await;

    Ok(Json(ApiResponse::ok(RevokedResponse {
        sessions_revoked,
        tokens_revoked,
    })))
}
