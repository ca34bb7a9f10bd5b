//! # movebase-entity
//!
//! Typed domain records for the MoveBase security engine. Records are
//! plain data: behavior lives in free functions and services that take a
//! record and return a new one, never in methods that mutate persistence
//! state in place.

pub mod account;
pub mod audit;
pub mod credential;
pub mod session;
pub mod token;

pub use account::{Account, AccountStatus, Role};
pub use audit::{AuditEntry, FieldChange};
pub use credential::Credential;
pub use session::{DeviceInfo, Session};
pub use token::{RevocationReason, RevocationRecord, TokenKind, TokenShadow};
