//! # movebase-core
//!
//! Core crate for the MoveBase security engine. Contains configuration
//! schemas, the unified error system, and the store trait every other
//! crate builds on.
//!
//! This crate has **no** internal dependencies on other MoveBase crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
