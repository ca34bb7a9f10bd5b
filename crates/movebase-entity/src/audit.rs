//! Append-only audit entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::Role;

/// A single field-level change captured in an audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name.
    pub field: String,
    /// Value before the change, JSON-encoded.
    pub old: Option<serde_json::Value>,
    /// Value after the change, JSON-encoded.
    pub new: Option<serde_json::Value>,
}

/// One audited action. Entries are append-only and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Acting account, if authenticated.
    pub actor_id: Option<Uuid>,
    /// Actor's role at the time of the action.
    pub role: Option<Role>,
    /// Action name, e.g. `"auth.login"` or `"session.revoke_all"`.
    pub action: String,
    /// Kind of resource acted on.
    pub resource_type: String,
    /// Identifier of the resource acted on.
    pub resource_id: Option<String>,
    /// Field-level diff for mutations.
    pub changes: Vec<FieldChange>,
    /// Whether the action succeeded.
    pub success: bool,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Create a new entry stamped now.
    pub fn new(
        actor_id: Option<Uuid>,
        role: Option<Role>,
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: Option<String>,
        success: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor_id,
            role,
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id,
            changes: Vec::new(),
            success,
            timestamp: Utc::now(),
        }
    }

    /// Attach a field-level diff.
    pub fn with_changes(mut self, changes: Vec<FieldChange>) -> Self {
        self.changes = changes;
        self
    }
}
