//! Per-job workspace directories

use crate::domain::{BundleError, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A scratch directory owned by exactly one job execution
///
/// [`Workspace::close`] removes the directory without blocking the runtime.
/// A guard dropped without being closed (panic, cancelled future) removes it
/// synchronously instead. Nothing is removed when created with `keep` set.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    keep: bool,
    closed: bool,
}

impl Workspace {
    /// Create `<root>/<id>`
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Io` if the directory cannot be created or already exists.
    pub async fn create(root: &Path, id: Uuid, keep: bool) -> Result<Self> {
        tokio::fs::create_dir_all(root).await.map_err(|e| {
            BundleError::Io(format!(
                "Failed to create workspace root {}: {}",
                root.display(),
                e
            ))
        })?;

        let path = root.join(id.hyphenated().to_string());
        tokio::fs::create_dir(&path).await.map_err(|e| {
            BundleError::Io(format!(
                "Failed to create workspace {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::trace!(workspace = %path.display(), "Workspace created");
        Ok(Self {
            path,
            keep,
            closed: false,
        })
    }

    /// Location of the workspace
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory on the blocking pool
    pub async fn close(mut self) {
        if self.keep {
            return;
        }

        let path = self.path.clone();
        let result = tokio::task::spawn_blocking(move || std::fs::remove_dir_all(path))
            .await
            .unwrap_or_else(|e| Err(std::io::Error::other(e)));
        log_removal(&self.path, result);
        self.closed = true;
    }
}

fn log_removal(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => tracing::trace!(workspace = %path.display(), "Workspace removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            workspace = %path.display(),
            error = %e,
            "Failed to remove workspace"
        ),
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if self.keep {
            tracing::info!(workspace = %self.path.display(), "Keeping workspace");
            return;
        }

        log_removal(&self.path, std::fs::remove_dir_all(&self.path));
    }
}
