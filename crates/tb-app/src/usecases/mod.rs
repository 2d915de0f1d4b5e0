//! Use cases.

pub mod gate;
pub mod onboarding;

pub use gate::{GateCoordinator, GateError, GateTimeouts};
pub use onboarding::{CompleteOnboarding, GetGateFlags, ResetGate};
