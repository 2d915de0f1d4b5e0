use std::sync::Arc;

use tb_core::flags::GateFlags;
use tb_core::ports::GateFlagsPort;

/// Use case for reading the current gate flags.
///
/// Backs the settings surface, which shows the sync preference and offers
/// re-onboarding.
pub struct GetGateFlags {
    flags: Arc<dyn GateFlagsPort>,
}

impl GetGateFlags {
    pub fn new(flags: Arc<dyn GateFlagsPort>) -> Self {
        Self { flags }
    }

    pub async fn execute(&self) -> anyhow::Result<GateFlags> {
        self.flags.get_flags().await
    }
}
