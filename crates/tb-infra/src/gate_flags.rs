//! File-based gate flags repository
//!
//! Persists the gate flags to a local JSON file in the application data
//! directory. The flags must be durable across restarts and readable before
//! any probe runs; a missing or empty file yields defaults.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use tb_core::flags::GateFlags;
use tb_core::ports::GateFlagsPort;

pub const DEFAULT_GATE_FLAGS_FILE: &str = ".gate_flags";

/// Per-user base directory for Tidebook state files.
pub fn default_base_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("tidebook"))
}

pub struct FileGateFlagsRepository {
    flags_file_path: PathBuf,
}

impl FileGateFlagsRepository {
    /// Create repository with custom file path
    pub fn new(flags_file_path: PathBuf) -> Self {
        Self { flags_file_path }
    }

    /// Create repository with defaults under the given base dir
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            flags_file_path: base_dir.join(DEFAULT_GATE_FLAGS_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.flags_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl GateFlagsPort for FileGateFlagsRepository {
    async fn get_flags(&self) -> anyhow::Result<GateFlags> {
        if !self.flags_file_path.exists() {
            return Ok(GateFlags::default());
        }

        let content = fs::read_to_string(&self.flags_file_path).await?;
        if content.trim().is_empty() {
            return Ok(GateFlags::default());
        }

        let flags: GateFlags = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse gate flags: {}", e))?;

        Ok(flags)
    }

    async fn set_flags(&self, flags: &GateFlags) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(flags)
            .map_err(|e| anyhow::anyhow!("Failed to serialize gate flags: {}", e))?;

        let mut file = fs::File::create(&self.flags_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create flags file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write flags file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync flags file: {}", e))?;

        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        if self.flags_file_path.exists() {
            fs::remove_file(&self.flags_file_path).await?;
        }
        Ok(())
    }
}
