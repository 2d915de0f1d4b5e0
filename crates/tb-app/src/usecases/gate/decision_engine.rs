//! Onboarding decision engine.

use std::sync::Arc;

use tb_core::gate::Decision;
use tb_core::ports::CloudAvailabilityPort;

/// Pure decision logic combining availability-checker results into one of
/// two outcomes.
///
/// The engine deliberately consults only `cloud_data_exists`: whether to
/// *offer* sync at all (which depends on account availability) is a
/// coordinator-level concern, kept separate from the decision about *data*.
pub struct OnboardingDecisionEngine {
    availability: Arc<dyn CloudAvailabilityPort>,
}

impl OnboardingDecisionEngine {
    pub fn new(availability: Arc<dyn CloudAvailabilityPort>) -> Self {
        Self { availability }
    }

    /// Evaluate the initial onboarding decision.
    ///
    /// Idempotent: no state is retained between calls, so an unchanged
    /// checker yields the same decision every time.
    pub async fn initial_decision(&self) -> Decision {
        if self.availability.cloud_data_exists().await {
            Decision::PromptForCloudDataChoice
        } else {
            Decision::ProceedWithStandardOnboarding
        }
    }
}
