//! Role and ownership based access control.

pub mod enforcer;
pub mod policies;

pub use enforcer::{Owned, RbacEnforcer};
pub use policies::{Permission, RbacPolicies};
