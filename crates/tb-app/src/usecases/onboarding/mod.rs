//! Onboarding flag use cases.

mod complete;
mod get_flags;
mod reset;

pub use complete::CompleteOnboarding;
pub use get_flags::GetGateFlags;
pub use reset::ResetGate;
