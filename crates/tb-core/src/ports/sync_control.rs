//! Sync control port
//!
//! Forwards sync-preference changes to the replication runtime. The call
//! must complete before any probe that depends on the new preference being
//! active runs, so the gate never probes with a stale configuration.

use async_trait::async_trait;

#[async_trait]
pub trait SyncControlPort: Send + Sync {
    /// Apply a sync-preference change to the sync runtime.
    async fn apply_sync_preference(&self, enable: bool) -> anyhow::Result<()>;
}
