//! In-memory repositories for engine records.
//!
//! These mirror the query surface a document store would serve (indexed
//! lookup, timestamp filters) over concurrent maps, so the engine above
//! them never depends on a particular wire protocol.

pub mod account;
pub mod credential;
pub mod session;
pub mod token_shadow;

pub use account::AccountRepository;
pub use credential::CredentialRepository;
pub use session::SessionRepository;
pub use token_shadow::TokenShadowRepository;
