// src/core/fs_ops.rs
//! File system helpers shared by the CLI, job files and exports

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::app_log;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(info, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write text, creating parent directories as needed.
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        Self::write_bytes(path, content.as_bytes()).await
    }

    pub async fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        app_log!(info, "Written file: {}", path.display());
        Ok(())
    }
}
