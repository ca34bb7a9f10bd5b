//! Audit recording that never blocks the operation it describes.

use std::sync::Arc;

use tracing::error;

use movebase_entity::AuditEntry;

use super::sink::AuditSink;

/// Records audit entries to the configured sink.
///
/// A sink failure is surfaced to observability and swallowed: the
/// triggering operation has already happened, and failing it over a lost
/// audit line would punish the user for our plumbing.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
}

impl AuditRecorder {
    /// Creates a recorder over the given sink.
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Records an entry, logging (not propagating) sink failures.
    pub async fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.sink.record(&entry).await {
            error!(
                action = %entry.action,
                error = %e,
                "Audit sink write failed; entry dropped"
            );
        }
    }
}
