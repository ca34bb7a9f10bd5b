//! Account record and role enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Roles available in the permission system.
///
/// Roles form a total order on privilege level:
/// Admin > Manager > ShiftLead = Mover > Customer.
/// ShiftLead and Mover are distinct roles that share a privilege tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full platform administrator.
    Admin,
    /// Branch manager: staff scheduling, booking oversight.
    Manager,
    /// Crew lead on a job: crew coordination plus mover duties.
    ShiftLead,
    /// Crew member assigned to jobs.
    Mover,
    /// Customer booking moves.
    Customer,
}

impl Role {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Manager => 2,
            Self::ShiftLead | Self::Mover => 1,
            Self::Customer => 0,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::ShiftLead => "shiftlead",
            Self::Mover => "mover",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = movebase_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "shiftlead" => Ok(Self::ShiftLead),
            "mover" => Ok(Self::Mover),
            "customer" => Ok(Self::Customer),
            _ => Err(movebase_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, manager, shiftlead, mover, customer"
            ))),
        }
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account may log in.
    Active,
    /// Account disabled by an administrator.
    Suspended,
}

/// A registered account on the MoveBase platform.
///
/// Profile management is owned by external collaborators; the engine only
/// needs what identity resolution and login require.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login email.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Account status.
    pub status: AccountStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new active account.
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            role,
            status: AccountStatus::Active,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }
}
