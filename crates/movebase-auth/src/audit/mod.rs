//! Append-only audit emission.

pub mod recorder;
pub mod sink;

pub use recorder::AuditRecorder;
pub use sink::{AuditSink, MemoryAuditSink, TracingAuditSink};
