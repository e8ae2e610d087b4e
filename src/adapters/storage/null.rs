//! Storage backend that discards everything

use crate::adapters::storage::traits::{BlobStorage, StorageObject};
use crate::domain::Result;
use async_trait::async_trait;
use std::path::Path;

/// Accepts every publish and stores nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBlobStorage;

#[async_trait]
impl BlobStorage for NullBlobStorage {
    async fn remove_directory(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "Null storage: remove directory");
        Ok(())
    }

    async fn store_directory(
        &self,
        path: &str,
        source: &Path,
        object: &StorageObject,
    ) -> Result<()> {
        tracing::debug!(
            path,
            source = %source.display(),
            content_type = %object.content_type,
            "Null storage: store directory"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
