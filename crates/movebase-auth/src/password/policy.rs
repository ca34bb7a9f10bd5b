//! Password strength policy.
//!
//! Validation never throws and never stops at the first violation: the
//! registration and change-password flows show users everything wrong
//! with a candidate at once.

use serde::{Deserialize, Serialize};

use movebase_core::config::auth::AuthConfig;

/// Passwords rejected outright regardless of composition. Kept small and
/// lowercase; candidates are lowercased before comparison.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "p@ssword",
    "p@ssw0rd",
    "123456",
    "1234567",
    "12345678",
    "123456789",
    "1234567890",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "abc123",
    "abcd1234",
    "iloveyou",
    "admin",
    "admin123",
    "welcome",
    "welcome1",
    "letmein",
    "monkey",
    "dragon",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "master",
    "shadow",
    "superman",
    "batman",
    "trustno1",
    "696969",
    "111111",
    "000000",
    "654321",
    "987654321",
];

/// Result of a policy validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCheck {
    /// Whether the candidate passed every rule.
    pub is_valid: bool,
    /// Every rule the candidate failed, in evaluation order.
    pub errors: Vec<String>,
}

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a candidate against all configured rules, collecting
    /// every violation.
    pub fn validate(&self, password: &str) -> PasswordCheck {
        let mut errors = Vec::new();

        if password.chars().count() < self.min_length {
            errors.push(format!(
                "Password must be at least {} characters long",
                self.min_length
            ));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            errors.push("Password must contain at least one uppercase letter".to_string());
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            errors.push("Password must contain at least one lowercase letter".to_string());
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Password must contain at least one digit".to_string());
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            errors.push("Password must contain at least one special character".to_string());
        }

        if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
            errors.push("Password is too common".to_string());
        }

        // Composition rules alone admit weak-but-compliant passwords;
        // the entropy estimate catches those.
        if errors.is_empty() {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < zxcvbn::Score::Three {
                errors.push(
                    "Password is too predictable. Please use a stronger password".to_string(),
                );
            }
        }

        PasswordCheck {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
