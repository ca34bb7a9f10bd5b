//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use movebase_entity::account::Role;

/// A platform permission gating an operation class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Bookings
    /// Create a booking.
    BookingCreate,
    /// View a booking.
    BookingView,
    /// Modify a booking.
    BookingUpdate,
    /// Cancel a booking.
    BookingCancel,
    /// Assign crews to bookings.
    BookingAssign,

    // Jobs (the crew-facing side of a booking)
    /// View assigned jobs.
    JobView,
    /// Update job progress and completion.
    JobUpdate,

    // Reviews
    /// Leave a review.
    ReviewCreate,
    /// View reviews.
    ReviewView,
    /// Remove reviews.
    ReviewModerate,

    // Chat
    /// Send chat messages.
    ChatSend,
    /// Read chat threads.
    ChatView,

    // Payments
    /// View payment records.
    PaymentView,
    /// Issue refunds.
    PaymentRefund,

    // Accounts & staffing
    /// Manage staff accounts.
    StaffManage,
    /// Manage crew availability schedules.
    AvailabilityManage,

    // Security administration
    /// View any user's active sessions.
    SessionViewAll,
    /// Revoke any user's sessions.
    SessionRevokeAll,
    /// Search the audit log.
    AuditView,

    // System
    /// Access health/status endpoints.
    SystemHealth,
}

/// Defines the mapping from each role to its set of allowed permissions.
///
/// The hierarchy is an explicit table, never inferred from role names.
/// Admin is not listed: [`RbacPolicies::has_permission`] grants admin
/// every permission unconditionally.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<Role, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Customer: own bookings, reviews, chat, payments.
        let customer: HashSet<Permission> = [
            Permission::BookingCreate,
            Permission::BookingView,
            Permission::BookingUpdate,
            Permission::BookingCancel,
            Permission::ReviewCreate,
            Permission::ReviewView,
            Permission::ChatSend,
            Permission::ChatView,
            Permission::PaymentView,
            Permission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Customer, customer);

        // Mover: assigned jobs, own availability, chat.
        let mover: HashSet<Permission> = [
            Permission::JobView,
            Permission::JobUpdate,
            Permission::AvailabilityManage,
            Permission::ReviewView,
            Permission::ChatSend,
            Permission::ChatView,
            Permission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Mover, mover);

        // Shift lead: mover duties plus booking visibility for the crew.
        let shiftlead: HashSet<Permission> = [
            Permission::JobView,
            Permission::JobUpdate,
            Permission::AvailabilityManage,
            Permission::BookingView,
            Permission::ReviewView,
            Permission::ChatSend,
            Permission::ChatView,
            Permission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::ShiftLead, shiftlead);

        // Manager: full booking oversight, staffing, moderation, refunds.
        let manager: HashSet<Permission> = [
            Permission::BookingCreate,
            Permission::BookingView,
            Permission::BookingUpdate,
            Permission::BookingCancel,
            Permission::BookingAssign,
            Permission::JobView,
            Permission::JobUpdate,
            Permission::ReviewView,
            Permission::ReviewModerate,
            Permission::ChatSend,
            Permission::ChatView,
            Permission::PaymentView,
            Permission::PaymentRefund,
            Permission::StaffManage,
            Permission::AvailabilityManage,
            Permission::SessionViewAll,
            Permission::AuditView,
            Permission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Manager, manager);

        Self { policies }
    }

    /// Checks whether the given role has the specified permission.
    /// Admin is granted every permission unconditionally.
    pub fn has_permission(&self, role: &Role, permission: &Permission) -> bool {
        if role.is_admin() {
            return true;
        }
        self.policies
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &Role) -> HashSet<Permission> {
        self.policies.get(role).cloned().unwrap_or_default()
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_everything() {
        let policies = RbacPolicies::new();
        assert!(policies.has_permission(&Role::Admin, &Permission::PaymentRefund));
        assert!(policies.has_permission(&Role::Admin, &Permission::SessionRevokeAll));
        assert!(policies.has_permission(&Role::Admin, &Permission::ChatSend));
    }

    #[test]
    fn test_customer_cannot_refund() {
        let policies = RbacPolicies::new();
        assert!(policies.has_permission(&Role::Customer, &Permission::BookingCreate));
        assert!(!policies.has_permission(&Role::Customer, &Permission::PaymentRefund));
        assert!(!policies.has_permission(&Role::Customer, &Permission::SessionViewAll));
    }

    #[test]
    fn test_shiftlead_sees_bookings_mover_does_not() {
        let policies = RbacPolicies::new();
        assert!(policies.has_permission(&Role::ShiftLead, &Permission::BookingView));
        assert!(!policies.has_permission(&Role::Mover, &Permission::BookingView));
    }
}
