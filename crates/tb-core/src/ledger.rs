//! Ledger record metadata visible to the gate.
//!
//! The gate never reads record contents. The only ledger fact it consumes
//! is whether records exist, optionally scoped by provenance.

use serde::{Deserialize, Serialize};

/// Origin of a ledger record.
///
/// Replicated records carry `Remote` so the gate's local scan can tell a
/// remote import apart from a record the user created on this device while
/// the scan was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordProvenance {
    /// Created on this device.
    Local,
    /// Replicated from the remote store.
    Remote,
}

impl RecordProvenance {
    /// Stable string form used by storage adapters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}
