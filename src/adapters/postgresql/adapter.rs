//! PostgreSQL adapter implementing the repository traits

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{BundleRow, LayerRow, BUNDLE_COLUMNS, LAYER_COLUMNS};
use crate::adapters::repository::traits::{BundleRepository, LayerRepository};
use crate::domain::ids::{BundleId, LayerId};
use crate::domain::{Bundle, BundleError, Layer, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// PostgreSQL implementation of the layer and bundle repositories
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl LayerRepository for PostgreSQLAdapter {
    async fn get_layer_by_id(&self, id: &LayerId) -> Result<Layer> {
        let query = format!("SELECT {LAYER_COLUMNS} FROM maplayer.layer WHERE id = $1");

        let row = self
            .client
            .query_opt(&query, &[id.as_uuid()])
            .await?
            .ok_or_else(|| BundleError::NotFound(format!("Layer {id}")))?;

        Ok(LayerRow::try_from(&row)?.into())
    }
}

#[async_trait]
impl BundleRepository for PostgreSQLAdapter {
    async fn get_bundle_by_id(&self, id: &BundleId) -> Result<Bundle> {
        let query = format!(
            "SELECT {BUNDLE_COLUMNS} FROM maplayer.bundle WHERE id = $1 AND delete_date IS NULL"
        );

        let row = self
            .client
            .query_opt(&query, &[id.as_uuid()])
            .await?
            .ok_or_else(|| BundleError::NotFound(format!("Bundle {id}")))?;

        Ok(BundleRow::try_from(&row)?.into())
    }

    async fn mark_built(&self, id: &BundleId) -> Result<()> {
        let affected = self
            .client
            .execute(
                "UPDATE maplayer.bundle SET complete_date = now() WHERE id = $1",
                &[id.as_uuid()],
            )
            .await?;

        if affected == 0 {
            return Err(BundleError::NotFound(format!("Bundle {id}")));
        }

        tracing::debug!(bundle_id = %id, "Bundle marked as built");
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }
}
