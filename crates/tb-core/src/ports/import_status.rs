//! Import status port
//!
//! Exposes the sync runtime's "initial import has produced a minimal usable
//! dataset" signal. Consumed only by the best-effort workspace-preparation
//! wait; its value never gates gate completion.

use async_trait::async_trait;

#[async_trait]
pub trait ImportStatusPort: Send + Sync {
    /// Whether the initial import has reached a safe-to-proceed point.
    async fn initial_import_completed(&self) -> bool;
}
