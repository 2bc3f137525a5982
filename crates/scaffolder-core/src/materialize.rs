//! Writing a planned project to disk

use crate::error::ScaffoldError;
use crate::generators::GeneratedFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Fail when `target_dir` exists. Checked before lookups and again before
/// writing.
pub fn ensure_target_free(target_dir: &Path) -> Result<(), ScaffoldError> {
    if target_dir.exists() {
        return Err(ScaffoldError::TargetExists(target_dir.to_path_buf()));
    }
    Ok(())
}

/// Create `target_dir` and write every planned file into it. Returns the
/// relative paths written, in plan order.
pub async fn write_project(target_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    ensure_target_free(target_dir)?;

    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let target_path = target_dir.join(&file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, &file.contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        tracing::debug!(path = %file.path.display(), "wrote");

        written.push(file.path.clone());
    }

    Ok(written)
}
