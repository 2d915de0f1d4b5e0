//! Ledger store port
//!
//! The gate's only view of the local record store: does it contain any
//! records, optionally scoped by provenance. The polling scan uses the
//! `Remote` scope so a record the user creates mid-scan cannot be mistaken
//! for replicated data.

use async_trait::async_trait;

use crate::ledger::RecordProvenance;

#[async_trait]
pub trait LedgerStorePort: Send + Sync {
    /// Whether the local store contains at least one record, optionally
    /// restricted to the given provenance.
    async fn has_records(&self, provenance: Option<RecordProvenance>) -> anyhow::Result<bool>;
}
