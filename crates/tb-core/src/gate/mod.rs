//! Onboarding gate domain.
//!
//! Pure types and the state transition function for the cloud sync
//! onboarding gate. Side effects are requested as [`GateAction`] values and
//! executed by the application layer.

mod decision;
mod state_machine;

pub use decision::{CloudDataChoice, Decision, FirstPromptChoice};
pub use state_machine::{GateAction, GateEvent, GateState, GateStateMachine};
