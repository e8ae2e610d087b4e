//! Repository factory

use crate::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
use crate::adapters::repository::traits::{BundleRepository, LayerRepository, Repositories};
use crate::config::schema::PostgreSQLConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the layer and bundle repositories from the database configuration
///
/// Both repositories share one connection pool.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the pool cannot be built
pub async fn create_repositories(config: &PostgreSQLConfig) -> Result<Repositories> {
    tracing::info!("Creating PostgreSQL repositories");
    let client = PostgreSQLClient::new(config.clone()).await?;
    let adapter = Arc::new(PostgreSQLAdapter::new(client));

    Ok(Repositories {
        layers: adapter.clone() as Arc<dyn LayerRepository + Send + Sync>,
        bundles: adapter as Arc<dyn BundleRepository + Send + Sync>,
    })
}
