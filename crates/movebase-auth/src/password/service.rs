//! Credential lifecycle: registration, login checks, password change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use movebase_core::config::auth::AuthConfig;
use movebase_core::error::AppError;
use movebase_core::result::AppResult;
use movebase_entity::Credential;
use movebase_store::repositories::CredentialRepository;

use super::hasher::PasswordHasher;
use super::policy::{PasswordCheck, PasswordPolicy};

/// Outcome of a credential verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Password matched.
    Valid,
    /// Password did not match.
    Invalid,
    /// The account is locked out until the given time.
    Locked { until: DateTime<Utc> },
}

/// Owns credential records: registration, verification with lockout
/// bookkeeping, and password change with history rotation.
#[derive(Debug, Clone)]
pub struct CredentialService {
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    credentials: Arc<CredentialRepository>,
    history_depth: usize,
    max_failed_attempts: u32,
    lockout_minutes: i64,
}

impl CredentialService {
    /// Creates a new credential service.
    pub fn new(config: &AuthConfig, credentials: Arc<CredentialRepository>) -> Self {
        Self {
            hasher: PasswordHasher::new(),
            policy: PasswordPolicy::new(config),
            credentials,
            history_depth: config.password_history_depth,
            max_failed_attempts: config.max_failed_attempts,
            lockout_minutes: config.lockout_duration_minutes as i64,
        }
    }

    /// The password policy contract exposed to registration and
    /// change-password collaborators.
    pub fn validate_password(&self, candidate: &str) -> PasswordCheck {
        self.policy.validate(candidate)
    }

    /// Creates the credential for a freshly registered account.
    /// The candidate must already have passed [`Self::validate_password`];
    /// this re-checks and rejects to keep the boundary airtight.
    pub async fn register(&self, user_id: Uuid, password: &str) -> AppResult<()> {
        let check = self.policy.validate(password);
        if !check.is_valid {
            return Err(AppError::validation(check.errors.join("; ")));
        }
        let hash = self.hasher.hash_password(password)?;
        self.credentials.save(Credential::new(user_id, hash)).await?;
        Ok(())
    }

    /// Verifies a login attempt, recording failures and applying lockout.
    pub async fn verify_login(&self, user_id: Uuid, password: &str) -> AppResult<CredentialCheck> {
        let credential = self
            .credentials
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No credential for account"))?;

        let now = Utc::now();
        if credential.is_locked(now) {
            let until = credential.locked_until.unwrap_or(now);
            return Ok(CredentialCheck::Locked { until });
        }

        if self
            .hasher
            .verify_password(password, &credential.password_hash)?
        {
            if credential.failed_attempts > 0 {
                self.credentials
                    .save(credential.with_attempts_reset())
                    .await?;
            }
            return Ok(CredentialCheck::Valid);
        }

        // Failed attempt: count it, lock at the threshold.
        let locked_until = if credential.failed_attempts + 1 >= self.max_failed_attempts {
            let until = now + chrono::Duration::minutes(self.lockout_minutes);
            warn!(%user_id, until = %until, "Account locked after repeated failed logins");
            Some(until)
        } else {
            None
        };
        self.credentials
            .save(credential.with_failed_attempt(locked_until))
            .await?;

        Ok(CredentialCheck::Invalid)
    }

    /// Changes a password: current must verify, candidate must pass
    /// policy and must not appear in the retained history.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current: &str,
        candidate: &str,
    ) -> AppResult<PasswordCheck> {
        let credential = self
            .credentials
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No credential for account"))?;

        if !self
            .hasher
            .verify_password(current, &credential.password_hash)?
        {
            return Ok(PasswordCheck {
                is_valid: false,
                errors: vec!["Current password is incorrect".to_string()],
            });
        }

        let mut check = self.policy.validate(candidate);
        if check.is_valid {
            let mut reused = self
                .hasher
                .check_history(candidate, &credential.password_history)?;
            if !reused {
                reused = self
                    .hasher
                    .verify_password(candidate, &credential.password_hash)?;
            }
            if reused {
                check.is_valid = false;
                check
                    .errors
                    .push("Password was used recently; choose a new one".to_string());
            }
        }

        if !check.is_valid {
            return Ok(check);
        }

        let new_hash = self.hasher.hash_password(candidate)?;
        self.credentials
            .save(credential.with_rotated_password(new_hash, self.history_depth))
            .await?;

        info!(%user_id, "Password changed");
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CredentialService {
        CredentialService::new(
            &AuthConfig::default(),
            Arc::new(CredentialRepository::new()),
        )
    }

    #[tokio::test]
    async fn test_register_and_verify() {
        let svc = service();
        let user = Uuid::new_v4();
        svc.register(user, "Tr4verse!Mountain#Lamp").await.unwrap();

        assert_eq!(
            svc.verify_login(user, "Tr4verse!Mountain#Lamp")
                .await
                .unwrap(),
            CredentialCheck::Valid
        );
        assert_eq!(
            svc.verify_login(user, "wrong").await.unwrap(),
            CredentialCheck::Invalid
        );
    }

    #[tokio::test]
    async fn test_lockout_after_repeated_failures() {
        let svc = service();
        let user = Uuid::new_v4();
        svc.register(user, "Tr4verse!Mountain#Lamp").await.unwrap();

        for _ in 0..5 {
            let _ = svc.verify_login(user, "wrong").await.unwrap();
        }
        // Even the correct password is rejected while locked.
        assert!(matches!(
            svc.verify_login(user, "Tr4verse!Mountain#Lamp")
                .await
                .unwrap(),
            CredentialCheck::Locked { .. }
        ));
    }

    #[tokio::test]
    async fn test_change_password_rejects_reuse() {
        let svc = service();
        let user = Uuid::new_v4();
        svc.register(user, "Tr4verse!Mountain#Lamp").await.unwrap();

        let ok = svc
            .change_password(user, "Tr4verse!Mountain#Lamp", "Gl0bal^Harbor&Pine")
            .await
            .unwrap();
        assert!(ok.is_valid);

        // The original password is now in the history.
        let reuse = svc
            .change_password(user, "Gl0bal^Harbor&Pine", "Tr4verse!Mountain#Lamp")
            .await
            .unwrap();
        assert!(!reuse.is_valid);
        assert!(reuse.errors.iter().any(|e| e.contains("used recently")));
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let svc = service();
        let user = Uuid::new_v4();
        svc.register(user, "Tr4verse!Mountain#Lamp").await.unwrap();

        let check = svc
            .change_password(user, "not-the-password", "Gl0bal^Harbor&Pine")
            .await
            .unwrap();
        assert!(!check.is_valid);
    }
}
