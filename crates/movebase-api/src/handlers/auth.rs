//! Auth handlers — login, logout, refresh, password lifecycle, me.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;
use validator::Validate;

use movebase_auth::jwt::hash_token;
use movebase_auth::sanitize::sanitize_string;
use movebase_core::error::AppError;
use movebase_entity::account::AccountStatus;
use movebase_entity::audit::AuditEntry;
use movebase_entity::session::DeviceInfo;
use movebase_entity::token::RevocationReason;
use movebase_auth::password::CredentialCheck;

use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, RefreshRequest, ValidatePasswordRequest,
};
use crate::dto::response::{
    ApiResponse, IdentityResponse, MessageResponse, PasswordCheckResponse, RevokedResponse,
    TokenResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientInfo, MaybeUser};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Account lookup and password verification share one failure shape:
    // no oracle for which of the two was wrong.
    let account = match state.accounts.find_by_email(&req.email).await? {
        Some(account) => account,
        None => {
            record_login_audit(&state, None, false).await;
            return Err(AppError::authentication("Invalid email or password").into());
        }
    };

    if account.status != AccountStatus::Active {
        record_login_audit(&state, Some(account.id), false).await;
        return Err(AppError::authorization("Account is suspended").into());
    }

    match state.credentials.verify_login(account.id, &req.password).await? {
        CredentialCheck::Valid => {}
        CredentialCheck::Invalid => {
            record_login_audit(&state, Some(account.id), false).await;
            return Err(AppError::authentication("Invalid email or password").into());
        }
        CredentialCheck::Locked { .. } => {
            record_login_audit(&state, Some(account.id), false).await;
            return Err(AppError::authorization(
                "Account is temporarily locked. Try again later.",
            )
            .into());
        }
    }

    // Session ID is chosen up front so both tokens can carry it.
    let session_id = Uuid::new_v4();
    let pair = state
        .token_issuer
        .issue_pair(
            account.id,
            session_id,
            account.role,
            &account.email,
            client.user_agent(),
            &client.ip_address,
        )
        .await?;

    let expires_at = chrono::Utc::now() + state.sessions.session_lifetime();
    state
        .sessions
        .create_session(
            session_id,
            account.id,
            &pair.refresh_token_hash,
            DeviceInfo {
                fingerprint: pair.fingerprint.clone(),
                ip_address: client.ip_address.clone(),
                user_agent: client.user_agent.as_deref().map(sanitize_string),
            },
            expires_at,
        )
        .await?;

    state
        .accounts
        .update_last_login(account.id, chrono::Utc::now())
        .await?;

    state
        .audit
        .record(AuditEntry::new(
            Some(account.id),
            Some(account.role),
            "auth.login",
            "session",
            Some(session_id.to_string()),
            true,
        ))
        .await;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    })))
}

/// POST /api/auth/logout — revokes the presented access token and the
/// session it belongs to (which kills the session's refresh token).
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .revocations
        .revoke(
            &hash_token(&auth.token),
            auth.identity.user_id,
            RevocationReason::Logout,
            auth.claims.expires_at(),
        )
        .await?;

    state
        .sessions
        .revoke_session_by_id(auth.claims.session_id(), RevocationReason::Logout)
        .await?;

    state
        .audit
        .record(AuditEntry::new(
            Some(auth.identity.user_id),
            Some(auth.identity.role),
            "auth.logout",
            "session",
            Some(auth.claims.session_id().to_string()),
            true,
        ))
        .await;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// POST /api/auth/logout-all — "log out everywhere" for the caller.
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<RevokedResponse>>, ApiError> {
    let user_id = auth.identity.user_id;

    let sessions_revoked = state
        .sessions
        .revoke_all_user_sessions(user_id, RevocationReason::Logout)
        .await?;
    let tokens_revoked = state
        .revocations
        .revoke_all_for_user(user_id, RevocationReason::Logout)
        .await?;

    state
        .audit
        .record(AuditEntry::new(
            Some(user_id),
            Some(auth.identity.role),
            "auth.logout_all",
            "session",
            None,
            true,
        ))
        .await;

    Ok(Json(ApiResponse::ok(RevokedResponse {
        sessions_revoked,
        tokens_revoked,
    })))
}

/// POST /api/auth/refresh — rotate a refresh token for a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let pair = state
        .token_rotator
        .rotate(
            &req.refresh_token,
            client.user_agent(),
            &client.ip_address,
        )
        .await?
        .ok_or_else(|| AppError::authentication("Invalid refresh token"))?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(IdentityResponse {
        user_id: auth.identity.user_id,
        role: auth.identity.role.to_string(),
        email: auth.identity.email,
    }))
}

/// GET /api/auth/identity — the `Identity | Anonymous` contract for
/// collaborators that serve anonymous callers too: resolution failure
/// is an anonymous context here, never a 401.
pub async fn identity(user: MaybeUser) -> Json<ApiResponse<Option<IdentityResponse>>> {
    Json(ApiResponse::ok(user.0.map(|auth| IdentityResponse {
        user_id: auth.identity.user_id,
        role: auth.identity.role.to_string(),
        email: auth.identity.email,
    })))
}

/// POST /api/auth/password/validate — the password policy contract for
/// registration flows.
pub async fn validate_password(
    State(state): State<AppState>,
    Json(req): Json<ValidatePasswordRequest>,
) -> Json<ApiResponse<PasswordCheckResponse>> {
    let check = state.credentials.validate_password(&req.password);
    Json(ApiResponse::ok(PasswordCheckResponse {
        is_valid: check.is_valid,
        errors: check.errors,
    }))
}

/// POST /api/auth/password — change the caller's password.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<PasswordCheckResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let check = state
        .credentials
        .change_password(
            auth.identity.user_id,
            &req.current_password,
            &req.new_password,
        )
        .await?;

    state
        .audit
        .record(AuditEntry::new(
            Some(auth.identity.user_id),
            Some(auth.identity.role),
            "auth.change_password",
            "credential",
            Some(auth.identity.user_id.to_string()),
            check.is_valid,
        ))
        .await;

    Ok(Json(ApiResponse::ok(PasswordCheckResponse {
        is_valid: check.is_valid,
        errors: check.errors,
    })))
}

async fn record_login_audit(state: &AppState, actor: Option<Uuid>, success: bool) {
    state
        .audit
        .record(AuditEntry::new(
            actor, None, "auth.login", "session", None, success,
        ))
        .await;
}
