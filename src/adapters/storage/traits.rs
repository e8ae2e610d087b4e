//! Blob storage trait

use crate::domain::Result;
use async_trait::async_trait;
use std::path::Path;

/// Metadata attached to every object uploaded by `store_directory`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    /// Content type of the stored files
    pub content_type: String,
    /// Cache-Control header value
    pub cache_control: String,
    /// Whether the objects are publicly readable
    pub is_public: bool,
}

/// Durable storage namespace addressed by slash-separated paths
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Remove everything stored under `path`
    ///
    /// Removing a path that does not exist succeeds.
    async fn remove_directory(&self, path: &str) -> Result<()>;

    /// Upload every file under the local `source` directory to `path`,
    /// preserving relative paths
    async fn store_directory(&self, path: &str, source: &Path, object: &StorageObject)
        -> Result<()>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}
