//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password; the policy runs its own full validation.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Password pre-validation request (registration UX).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatePasswordRequest {
    /// Candidate password.
    pub password: String,
}

/// Administrative session revocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeSessionsRequest {
    /// Free-form reason recorded in the audit trail.
    pub reason: Option<String>,
}
