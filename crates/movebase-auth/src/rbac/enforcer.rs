//! Permission enforcement: role tables plus resource ownership.

use uuid::Uuid;

use movebase_core::error::AppError;
use movebase_entity::account::Role;

use super::policies::{Permission, RbacPolicies};

/// Anything with a recorded owner.
///
/// Listing endpoints filter through this so responses never leak another
/// owner's rows; the filtering happens server-side, never on the client.
pub trait Owned {
    /// The account that owns this item.
    fn owner_id(&self) -> Uuid;
}

/// Enforces role-based access control and ownership checks.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the role has the required permission.
    pub fn has_permission(&self, role: &Role, permission: &Permission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Checks whether the given role has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or `Err(AppError::Authorization)` if denied.
    pub fn require_permission(
        &self,
        role: &Role,
        permission: &Permission,
    ) -> Result<(), AppError> {
        if self.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Ownership is identity equality between the requesting subject and
    /// the resource's recorded owner.
    pub fn check_ownership(&self, subject_id: Uuid, owner_id: Uuid) -> bool {
        subject_id == owner_id
    }

    /// The combined gate for operating on a specific resource: the role
    /// must carry the permission, and unless it is admin, the subject
    /// must own the resource.
    pub fn can_access_resource(
        &self,
        role: &Role,
        permission: &Permission,
        subject_id: Uuid,
        owner_id: Uuid,
    ) -> bool {
        self.has_permission(role, permission)
            && (role.is_admin() || self.check_ownership(subject_id, owner_id))
    }

    /// Applies [`Self::can_access_resource`] across a listing, retaining
    /// only the items the subject may see.
    pub fn filter_owned<T: Owned>(
        &self,
        items: Vec<T>,
        role: &Role,
        subject_id: Uuid,
        permission: &Permission,
    ) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| {
                self.can_access_resource(role, permission, subject_id, item.owner_id())
            })
            .collect()
    }

    /// Checks whether the given role is at least the specified minimum role.
    pub fn require_minimum_role(
        &self,
        actual_role: &Role,
        minimum_role: &Role,
    ) -> Result<(), AppError> {
        if actual_role.has_at_least(minimum_role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{actual_role}' is insufficient; minimum required: '{minimum_role}'"
            )))
        }
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}
