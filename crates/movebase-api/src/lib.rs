//! # movebase-api
//!
//! HTTP boundary for the MoveBase security engine built on Axum.
//!
//! Exposes the auth lifecycle (login, logout, refresh, CSRF issuance,
//! session administration, health), the middleware stack (rate limiting,
//! CSRF, request deadline, logging), identity extractors, and the
//! `AppError` → HTTP mapping. Business routes live with external
//! collaborators that consume this engine's verdicts.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
