//! Credential repository.

use dashmap::DashMap;
use uuid::Uuid;

use movebase_core::result::AppResult;
use movebase_entity::Credential;

/// Credentials keyed by owning account.
#[derive(Debug, Default)]
pub struct CredentialRepository {
    credentials: DashMap<Uuid, Credential>,
}

impl CredentialRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the credential for an account.
    pub async fn save(&self, credential: Credential) -> AppResult<Credential> {
        self.credentials
            .insert(credential.user_id, credential.clone());
        Ok(credential)
    }

    /// Find the credential for an account.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Credential>> {
        Ok(self.credentials.get(&user_id).map(|c| c.value().clone()))
    }
}
