use std::sync::Arc;

use tb_core::ports::GateFlagsPort;

/// Use case for completing onboarding.
///
/// Marks onboarding as concluded in the persistent flags; other flags are
/// preserved.
pub struct CompleteOnboarding {
    flags: Arc<dyn GateFlagsPort>,
}

impl CompleteOnboarding {
    pub fn new(flags: Arc<dyn GateFlagsPort>) -> Self {
        Self { flags }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let mut flags = self.flags.get_flags().await?;
        flags.onboarding_completed = true;
        self.flags.set_flags(&flags).await
    }
}
