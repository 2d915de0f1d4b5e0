//! Port interfaces for the application layer
//!
//! Ports define the contract between the gate logic (use cases) and
//! infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.

pub mod cloud;
pub mod events;
pub mod flags;
pub mod import_status;
pub mod ledger;
pub mod stale_hint;
pub mod sync_control;

pub use cloud::CloudAvailabilityPort;
pub use events::GateEventPort;
pub use flags::GateFlagsPort;
pub use import_status::ImportStatusPort;
pub use ledger::LedgerStorePort;
pub use stale_hint::StaleHintPort;
pub use sync_control::SyncControlPort;
