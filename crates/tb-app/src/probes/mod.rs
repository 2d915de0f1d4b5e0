//! Bounded-time probes.
//!
//! Every probe carries an explicit deadline and treats timeout as a
//! first-class `false` result, never a raised failure. Runtime timing lives
//! here rather than in tb-core so the domain machine stays pure.

mod import_monitor;
mod local_scan;
mod remote;

pub use import_monitor::ImportCompletionMonitor;
pub use local_scan::PollingImportProbe;
pub use remote::RemoteExistenceProbe;
