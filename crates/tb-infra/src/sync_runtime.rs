//! Channel bridges to the sync runtime
//!
//! The replication runtime is an external collaborator; the gate only needs
//! to push preference changes into it and observe its initial-import
//! signal. Both bridges are watch channels so the runtime side can consume
//! or publish at its own pace.

use async_trait::async_trait;
use anyhow::anyhow;
use tokio::sync::watch;
use tracing::debug;

use tb_core::ports::{ImportStatusPort, SyncControlPort};

/// Gate-side handle that forwards sync-preference changes to the runtime.
///
/// `apply_sync_preference` returns once the new value is published, which
/// satisfies the gate's requirement that the preference is active before
/// any dependent probe runs.
pub struct SyncRuntimeHandle {
    preference_tx: watch::Sender<bool>,
}

impl SyncRuntimeHandle {
    /// Creates the handle plus the receiver the runtime watches.
    pub fn new(initial_enabled: bool) -> (Self, watch::Receiver<bool>) {
        let (preference_tx, preference_rx) = watch::channel(initial_enabled);
        (Self { preference_tx }, preference_rx)
    }
}

#[async_trait]
impl SyncControlPort for SyncRuntimeHandle {
    async fn apply_sync_preference(&self, enable: bool) -> anyhow::Result<()> {
        self.preference_tx
            .send(enable)
            .map_err(|_| anyhow!("sync runtime is no longer listening"))?;
        debug!(enable, "sync preference published to runtime");
        Ok(())
    }
}

/// Runtime-side reporter for import progress.
pub struct ImportActivityReporter {
    completed_tx: watch::Sender<bool>,
}

impl ImportActivityReporter {
    /// Called by the runtime when the initial import has produced a minimal
    /// usable dataset.
    pub fn report_initial_import_completed(&self) {
        let _ = self.completed_tx.send(true);
    }
}

/// Gate-side monitor implementing `ImportStatusPort`.
pub struct ImportActivityMonitor {
    completed_rx: watch::Receiver<bool>,
}

#[async_trait]
impl ImportStatusPort for ImportActivityMonitor {
    async fn initial_import_completed(&self) -> bool {
        *self.completed_rx.borrow()
    }
}

/// Creates the reporter/monitor pair for the initial-import signal.
pub fn import_activity_channel() -> (ImportActivityReporter, ImportActivityMonitor) {
    let (completed_tx, completed_rx) = watch::channel(false);
    (
        ImportActivityReporter { completed_tx },
        ImportActivityMonitor { completed_rx },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preference_changes_reach_the_runtime_receiver() {
        let (handle, rx) = SyncRuntimeHandle::new(false);

        handle.apply_sync_preference(true).await.unwrap();
        assert!(*rx.borrow());

        handle.apply_sync_preference(false).await.unwrap();
        assert!(!*rx.borrow());
    }

    #[tokio::test]
    async fn apply_fails_once_the_runtime_is_gone() {
        let (handle, rx) = SyncRuntimeHandle::new(false);
        drop(rx);

        assert!(handle.apply_sync_preference(true).await.is_err());
    }

    #[tokio::test]
    async fn import_completion_is_observed_after_the_report() {
        let (reporter, monitor) = import_activity_channel();

        assert!(!monitor.initial_import_completed().await);
        reporter.report_initial_import_completed();
        assert!(monitor.initial_import_completed().await);
    }
}
