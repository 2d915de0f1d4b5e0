//! Gate flags port
//!
//! This port defines the contract for persisting and retrieving the durable
//! gate flags. Implementations are provided by the infrastructure layer
//! (e.g., file-based storage) and must be readable before any probe runs.

use async_trait::async_trait;

use crate::flags::GateFlags;

#[async_trait]
pub trait GateFlagsPort: Send + Sync {
    /// Get current gate flags
    async fn get_flags(&self) -> anyhow::Result<GateFlags>;

    /// Update gate flags
    async fn set_flags(&self, flags: &GateFlags) -> anyhow::Result<()>;

    /// Reset flags (for testing or re-onboarding)
    async fn reset(&self) -> anyhow::Result<()>;

    /// Check if onboarding has completed
    async fn is_completed(&self) -> anyhow::Result<bool> {
        Ok(self.get_flags().await?.onboarding_completed)
    }
}
