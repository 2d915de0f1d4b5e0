//! Cloud availability port
//!
//! Capability interface over the remote provider's account/session status
//! and a lightweight data-existence check. Implementations must apply an
//! internal timeout and coerce every failure to `false`; the gate must
//! never fail outright because a remote check did, only degrade to the
//! standard onboarding path.

use async_trait::async_trait;

#[async_trait]
pub trait CloudAvailabilityPort: Send + Sync {
    /// Whether a remote account/session is currently usable.
    async fn account_available(&self) -> bool;

    /// Whether the remote store currently contains any record attributable
    /// to this application.
    async fn cloud_data_exists(&self) -> bool;
}
