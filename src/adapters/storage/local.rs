//! Filesystem-backed blob storage

use crate::adapters::storage::traits::{BlobStorage, StorageObject};
use crate::domain::{BundleError, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Stores published directories below a root directory
///
/// Destination paths are interpreted relative to the root and may not escape it.
#[derive(Debug, Clone)]
pub struct LocalBlobStorage {
    root: PathBuf,
}

impl LocalBlobStorage {
    /// Create a storage rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a storage path to a location under the root
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return Err(BundleError::Storage(
                "Storage path cannot be empty".to_string(),
            ));
        }

        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(BundleError::Storage(format!(
                "Storage path '{path}' must not leave the storage root"
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn remove_directory(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;

        match tokio::fs::remove_dir_all(&target).await {
            Ok(()) => {
                tracing::trace!(path = %target.display(), "Removed directory");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BundleError::Storage(format!(
                "Failed to remove {}: {}",
                target.display(),
                e
            ))),
        }
    }

    async fn store_directory(
        &self,
        path: &str,
        source: &Path,
        object: &StorageObject,
    ) -> Result<()> {
        let target = self.resolve(path)?;

        let copied = copy_tree(source, &target).await.map_err(|e| {
            BundleError::Storage(format!(
                "Failed to store {} into {}: {}",
                source.display(),
                target.display(),
                e
            ))
        })?;

        tracing::debug!(
            path,
            files = copied,
            content_type = %object.content_type,
            cache_control = %object.cache_control,
            is_public = object.is_public,
            "Stored directory"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Copy every file below `source` into `target`, returning the number of files
async fn copy_tree(source: &Path, target: &Path) -> std::io::Result<usize> {
    let mut pending = vec![(source.to_path_buf(), target.to_path_buf())];
    let mut copied = 0;

    while let Some((from, to)) = pending.pop() {
        tokio::fs::create_dir_all(&to).await?;

        let mut entries = tokio::fs::read_dir(&from).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let destination = to.join(entry.file_name());

            if file_type.is_dir() {
                pending.push((entry.path(), destination));
            } else {
                tokio::fs::copy(entry.path(), &destination).await?;
                copied += 1;
            }
        }
    }

    Ok(copied)
}
