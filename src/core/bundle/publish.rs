//! Publishing finished formats

use crate::adapters::storage::{BlobStorage, StorageObject};
use crate::domain::ids::{BundleId, OrganizationId};
use crate::domain::{GeometryFormat, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Serializes every remove and store pair in the process
static PUBLISH_LOCK: Mutex<()> = Mutex::const_new(());

/// Storage path a format of a bundle is published to
///
/// ```rust
/// use geobundle::core::bundle::destination_path;
/// use geobundle::domain::{BundleId, GeometryFormat, OrganizationId};
/// use std::str::FromStr;
///
/// let org = OrganizationId::from_str("5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a").unwrap();
/// let bundle = BundleId::from_str("0d6f4a0e-0c1f-4c55-9d59-3c0d2b8d6c11").unwrap();
/// assert_eq!(
///     destination_path(&org, &bundle, GeometryFormat::GeoPackage),
///     "dist/ORG5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a/BND0d6f4a0e-0c1f-4c55-9d59-3c0d2b8d6c11/GPKG"
/// );
/// ```
pub fn destination_path(
    organization_id: &OrganizationId,
    bundle_id: &BundleId,
    format: GeometryFormat,
) -> String {
    format!(
        "dist/ORG{}/BND{}/{}",
        organization_id,
        bundle_id,
        format.short_name()
    )
}

/// Replaces published directories in blob storage
#[derive(Clone)]
pub struct Publisher {
    storage: Arc<dyn BlobStorage + Send + Sync>,
    cache_control: String,
}

impl Publisher {
    /// Create a publisher attaching `cache_control` to every object
    pub fn new(
        storage: Arc<dyn BlobStorage + Send + Sync>,
        cache_control: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            cache_control: cache_control.into(),
        }
    }

    /// Replace the contents of `destination` with the files under `source`
    ///
    /// The old contents are removed first. The pair runs under a process-wide
    /// lock, so no other publish can interleave with it.
    pub async fn publish(
        &self,
        destination: &str,
        source: &Path,
        format: GeometryFormat,
    ) -> Result<()> {
        let object = StorageObject {
            content_type: format.property().content_type.to_string(),
            cache_control: self.cache_control.clone(),
            is_public: true,
        };

        let _guard = PUBLISH_LOCK.lock().await;
        let start = Instant::now();

        tracing::trace!(destination, "Deleting existing files");
        self.storage.remove_directory(destination).await?;

        tracing::trace!(destination, source = %source.display(), "Uploading format");
        self.storage
            .store_directory(destination, source, &object)
            .await?;

        crate::log_publish_complete!(destination, start.elapsed());
        Ok(())
    }
}
