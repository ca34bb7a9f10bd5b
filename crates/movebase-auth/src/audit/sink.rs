//! Audit sinks.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use movebase_core::result::AppResult;
use movebase_entity::AuditEntry;

/// Destination for audit entries. The platform's log collector is an
/// external collaborator; in-process sinks cover structured log emission
/// and tests.
#[async_trait]
pub trait AuditSink: Send + Sync + std::fmt::Debug + 'static {
    /// Record one entry.
    async fn record(&self, entry: &AuditEntry) -> AppResult<()>;
}

/// Emits audit entries as structured log events.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, entry: &AuditEntry) -> AppResult<()> {
        info!(
            target: "movebase::audit",
            entry_id = %entry.id,
            actor = ?entry.actor_id,
            role = ?entry.role,
            action = %entry.action,
            resource_type = %entry.resource_type,
            resource_id = ?entry.resource_id,
            changes = entry.changes.len(),
            success = entry.success,
            "audit"
        );
        Ok(())
    }
}

/// Collects entries in memory for tests and admin queries.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, entry: &AuditEntry) -> AppResult<()> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }
}
