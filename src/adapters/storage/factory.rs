//! Blob storage factory

use crate::adapters::storage::local::LocalBlobStorage;
use crate::adapters::storage::null::NullBlobStorage;
use crate::adapters::storage::traits::BlobStorage;
use crate::config::schema::{StorageBackend, StorageConfig};
use std::sync::Arc;

/// Create the blob storage selected by `storage.backend`
pub fn create_blob_storage(config: &StorageConfig) -> Arc<dyn BlobStorage + Send + Sync> {
    match config.backend {
        StorageBackend::Local => {
            tracing::info!(root = %config.local_path, "Using local blob storage");
            Arc::new(LocalBlobStorage::new(&config.local_path))
        }
        StorageBackend::Null => {
            tracing::info!("Using null blob storage, publishes are discarded");
            Arc::new(NullBlobStorage)
        }
    }
}
