//! # tb-core
//!
//! Core domain models and business logic for Tidebook's cloud sync
//! onboarding gate.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies. Runtime behaviors like timeouts and polling are handled
//! by the application layer (tb-app).

pub mod flags;
pub mod gate;
pub mod ledger;
pub mod ports;

// Re-export commonly used types at the crate root
pub use flags::GateFlags;
pub use gate::{
    CloudDataChoice, Decision, FirstPromptChoice, GateAction, GateEvent, GateState,
    GateStateMachine,
};
pub use ledger::RecordProvenance;
