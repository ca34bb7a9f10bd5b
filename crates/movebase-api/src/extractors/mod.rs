//! Axum extractors for identity and client context.

pub mod auth;
pub mod client;

pub use auth::{AuthUser, MaybeUser};
pub use client::ClientInfo;
