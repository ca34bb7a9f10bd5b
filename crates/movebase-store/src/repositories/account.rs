//! Account repository.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use movebase_core::error::AppError;
use movebase_core::result::AppResult;
use movebase_entity::Account;

/// Accounts keyed by ID with a lowercase-email uniqueness index.
#[derive(Debug, Default)]
pub struct AccountRepository {
    accounts: DashMap<Uuid, Account>,
    by_email: DashMap<String, Uuid>,
}

impl AccountRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account. Fails with a conflict if the email is taken.
    pub async fn create(&self, account: Account) -> AppResult<Account> {
        let email_key = account.email.to_lowercase();
        match self.by_email.entry(email_key) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "An account with email '{}' already exists",
                account.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(account.id);
                self.accounts.insert(account.id, account.clone());
                Ok(account)
            }
        }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.value().clone()))
    }

    /// Find an account by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let id = self.by_email.get(&email.to_lowercase()).map(|id| *id);
        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Record a successful login timestamp.
    pub async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(mut account) = self.accounts.get_mut(&id) {
            account.last_login_at = Some(at);
        }
        Ok(())
    }
}
