//! Remote existence probe.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use tb_core::ports::CloudAvailabilityPort;

/// Single bounded-time check for "does any remote data exist right now".
pub struct RemoteExistenceProbe {
    availability: Arc<dyn CloudAvailabilityPort>,
}

impl RemoteExistenceProbe {
    pub fn new(availability: Arc<dyn CloudAvailabilityPort>) -> Self {
        Self { availability }
    }

    /// Issues one existence query and races it against a timer.
    ///
    /// A timer win means "no confirmed data", never "confirmed no data";
    /// callers must not persist a negative stale-data hint based on it.
    /// No retries happen within a single call.
    pub async fn has_any_remote_data(&self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.availability.cloud_data_exists()).await {
            Ok(found) => found,
            Err(_) => {
                debug!(
                    timeout_ms = timeout.as_millis() as u64,
                    "remote existence probe timed out"
                );
                false
            }
        }
    }
}
