//! Initial-import completion monitor.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use tb_core::ports::ImportStatusPort;

/// Waits, with a deadline and polling interval, for an in-progress initial
/// import to reach a safe-to-proceed point.
///
/// Unlike the existence probes, the return value does not gate branching:
/// the coordinator marks onboarding complete either way, because waiting
/// indefinitely for a full import would keep the user out of the
/// application. The wait only smooths the first render of the workspace.
pub struct ImportCompletionMonitor {
    import_status: Arc<dyn ImportStatusPort>,
}

impl ImportCompletionMonitor {
    pub fn new(import_status: Arc<dyn ImportStatusPort>) -> Self {
        Self { import_status }
    }

    /// Polls for import completion, returning `true` as soon as observed or
    /// `false` when the timeout elapses.
    pub async fn await_initial_import(&self, timeout: Duration, poll_interval: Duration) -> bool {
        if self.import_status.initial_import_completed().await {
            return true;
        }
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            tokio::time::sleep(poll_interval).await;
            if self.import_status.initial_import_completed().await {
                return true;
            }
        }
        false
    }
}
