//! Request-scoped working context

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch space owned by a single merge request.
///
/// Output is rendered here first and only moved to its destination once it
/// is complete, so a failed request never leaves a partial file behind. The
/// directory is removed when the context is dropped.
pub struct WorkContext {
    scratch: TempDir,
}

impl WorkContext {
    /// Create a fresh scratch directory next to `destination`, so the final
    /// move is a same-filesystem rename.
    pub fn for_destination(destination: &Path) -> Result<Self> {
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .with_context(|| format!("Failed creating output directory {}", parent.display()))?;
        let scratch = tempfile::Builder::new()
            .prefix(".sheet-merge-")
            .tempdir_in(&parent)
            .with_context(|| format!("Failed creating work directory in {}", parent.display()))?;
        tracing::debug!("Work directory: {}", scratch.path().display());
        Ok(Self { scratch })
    }

    pub fn root(&self) -> &Path {
        self.scratch.path()
    }

    /// Path of a file inside the scratch directory.
    pub fn staged(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Move a staged file to `destination`, replacing any existing file.
    pub fn persist(&self, staged: &Path, destination: &Path) -> Result<()> {
        let rename_err = match fs::rename(staged, destination) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        tracing::debug!(
            "Rename to {} failed ({}), copying instead",
            destination.display(),
            rename_err
        );
        fs::copy(staged, destination).with_context(|| {
            format!(
                "Failed writing output file {} (rename failed: {})",
                destination.display(),
                rename_err
            )
        })?;
        Ok(())
    }
}
