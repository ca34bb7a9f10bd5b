//! Integration tests for the MoveBase security engine.
//!
//! Each suite drives the real Axum router over the in-memory store, so
//! the full middleware chain (deadline → rate limit → CSRF) and the
//! engine behind it are exercised exactly as in production, minus the
//! network.

mod helpers;

mod auth_flow_test;
mod csrf_test;
mod device_binding_test;
mod permission_test;
mod rate_limit_test;
mod rotation_test;
mod session_cap_test;
