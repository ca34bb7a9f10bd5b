//! The untrusted-input trust boundary.
//!
//! Everything externally supplied passes through here before it reaches
//! the permission engine or any persistence call.

pub mod format;
pub mod html;
pub mod object;

pub use format::{is_valid_email, is_valid_phone, is_valid_url, sanitize_filename};
pub use html::{escape_html, sanitize_string, strip_html_tags};
pub use object::sanitize_object;
