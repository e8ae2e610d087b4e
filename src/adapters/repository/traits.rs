//! Repository traits

use crate::domain::ids::{BundleId, LayerId};
use crate::domain::{Bundle, Layer, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Lookup of map layers
#[async_trait]
pub trait LayerRepository: Send + Sync {
    /// Fetch a layer by its identifier
    ///
    /// # Errors
    ///
    /// Returns `BundleError::NotFound` if no layer has this id, or
    /// `BundleError::Database` if the lookup fails.
    async fn get_layer_by_id(&self, id: &LayerId) -> Result<Layer>;
}

/// Lookup and completion tracking of bundles
#[async_trait]
pub trait BundleRepository: Send + Sync {
    /// Fetch a bundle by its identifier
    ///
    /// # Errors
    ///
    /// Returns `BundleError::NotFound` if no bundle has this id.
    async fn get_bundle_by_id(&self, id: &BundleId) -> Result<Bundle>;

    /// Record that the bundle finished building by setting its completion date
    ///
    /// # Errors
    ///
    /// Returns `BundleError::NotFound` if no row was updated.
    async fn mark_built(&self, id: &BundleId) -> Result<()>;

    /// Check that the database answers
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Database` if no connection can be made.
    async fn test_connection(&self) -> Result<()>;
}

/// Both repositories, usually backed by the same connection pool
#[derive(Clone)]
pub struct Repositories {
    /// Layer lookup
    pub layers: Arc<dyn LayerRepository + Send + Sync>,
    /// Bundle lookup and completion
    pub bundles: Arc<dyn BundleRepository + Send + Sync>,
}
