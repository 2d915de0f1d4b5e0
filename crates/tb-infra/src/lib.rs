//! # tb-infra
//!
//! Infrastructure adapters behind the tb-core ports: file-backed flag
//! stores, the HTTP cloud availability checker, the SQLite ledger probe,
//! and the channel-based bridges to the sync runtime and the UI layer.

pub mod cloud_http;
pub mod gate_events;
pub mod gate_flags;
pub mod ledger_sqlite;
pub mod stale_hint;
pub mod sync_runtime;

pub use cloud_http::{CloudEndpointConfig, HttpCloudAvailability};
pub use gate_events::BroadcastGateEvents;
pub use gate_flags::FileGateFlagsRepository;
pub use ledger_sqlite::SqliteLedgerProbeRepository;
pub use stale_hint::FileStaleHintRepository;
pub use sync_runtime::{import_activity_channel, ImportActivityMonitor, ImportActivityReporter, SyncRuntimeHandle};
