//! Stale-data hint port
//!
//! Best-effort, cross-device hint meaning "remote data was seen to exist
//! previously". Any device may set it. It is only used to bias the scan
//! toward the fast remote existence probe and is never authoritative; a
//! probe timeout must not be persisted as a negative hint.

use async_trait::async_trait;

#[async_trait]
pub trait StaleHintPort: Send + Sync {
    /// Whether any device previously confirmed remote data. Read failures
    /// degrade to `false`.
    async fn has_cloud_data(&self) -> bool;

    /// Record that remote data was positively confirmed.
    async fn set_has_cloud_data(&self) -> anyhow::Result<()>;

    /// Clear the hint (settings/reset surface only).
    async fn clear(&self) -> anyhow::Result<()>;
}
