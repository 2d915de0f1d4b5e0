//! File-based stale-data hint repository
//!
//! The hint file is expected to live in a directory replicated across the
//! user's devices (the sync provider's shared settings area), so any device
//! can record "remote data was seen". Reads degrade to `false` on any
//! failure; the hint is advisory only and always re-verified by a probe.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::warn;

use tb_core::ports::StaleHintPort;

pub const DEFAULT_STALE_HINT_FILE: &str = ".cloud_data_hint";

#[derive(Debug, Default, Serialize, Deserialize)]
struct HintFile {
    has_cloud_data: bool,
}

pub struct FileStaleHintRepository {
    hint_file_path: PathBuf,
}

impl FileStaleHintRepository {
    pub fn new(hint_file_path: PathBuf) -> Self {
        Self { hint_file_path }
    }

    pub fn with_defaults(shared_dir: PathBuf) -> Self {
        Self {
            hint_file_path: shared_dir.join(DEFAULT_STALE_HINT_FILE),
        }
    }

    async fn read_hint(&self) -> anyhow::Result<HintFile> {
        if !self.hint_file_path.exists() {
            return Ok(HintFile::default());
        }
        let content = fs::read_to_string(&self.hint_file_path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_hint(&self, hint: &HintFile) -> anyhow::Result<()> {
        if let Some(parent) = self.hint_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(hint)?;
        fs::write(&self.hint_file_path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl StaleHintPort for FileStaleHintRepository {
    async fn has_cloud_data(&self) -> bool {
        match self.read_hint().await {
            Ok(hint) => hint.has_cloud_data,
            Err(err) => {
                warn!(error = %err, "failed to read stale data hint");
                false
            }
        }
    }

    async fn set_has_cloud_data(&self) -> anyhow::Result<()> {
        // Already set by this or another device; avoid churning a
        // replicated file.
        if self.has_cloud_data().await {
            return Ok(());
        }
        self.write_hint(&HintFile {
            has_cloud_data: true,
        })
        .await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.write_hint(&HintFile {
            has_cloud_data: false,
        })
        .await
    }
}
