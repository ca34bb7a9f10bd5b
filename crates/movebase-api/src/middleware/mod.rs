//! Axum middleware stack.

pub mod csrf;
pub mod deadline;
pub mod logging;
pub mod rate_limit;
