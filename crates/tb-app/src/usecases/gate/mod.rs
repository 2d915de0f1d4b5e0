//! Gate use cases.
//!
//! This module exposes the gate coordinator and the decision engine.

mod context;
pub mod coordinator;
pub mod decision_engine;

pub use coordinator::{GateCoordinator, GateError, GateTimeouts};
pub use decision_engine::OnboardingDecisionEngine;
