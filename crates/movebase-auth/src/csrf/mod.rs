//! Double-submit CSRF protection.

pub mod guard;

pub use guard::CsrfGuard;
