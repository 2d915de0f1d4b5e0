//! Local polling scan for replicated data.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use tb_core::ledger::RecordProvenance;
use tb_core::ports::LedgerStorePort;

/// Polls the local store for signs that a remote import has populated data.
///
/// Replicated records can land in the local store before any remote
/// existence API reflects them, so polling the local effect is the most
/// reliable cross-provider signal. The check is scoped to records with
/// remote provenance, so a record the user creates on this device during
/// the scan window cannot be misread as existing remote data.
pub struct PollingImportProbe {
    ledger: Arc<dyn LedgerStorePort>,
}

impl PollingImportProbe {
    pub fn new(ledger: Arc<dyn LedgerStorePort>) -> Self {
        Self { ledger }
    }

    /// Checks at fixed intervals until the signal is observed (`true`
    /// immediately) or the timeout elapses (`false`). A final check runs at
    /// the deadline so a record landing on the last interval still counts.
    pub async fn scan_for_existing_data(&self, timeout: Duration, poll_interval: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.has_remote_records_once().await {
                return true;
            }
            tokio::time::sleep(poll_interval).await;
        }
        self.has_remote_records_once().await
    }

    async fn has_remote_records_once(&self) -> bool {
        match self
            .ledger
            .has_records(Some(RecordProvenance::Remote))
            .await
        {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "local ledger scan failed");
                false
            }
        }
    }
}
