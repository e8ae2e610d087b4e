//! Core business logic for geobundle.
//!
//! # Modules
//!
//! - [`dataset`] - Conversion endpoints and command assembly
//! - [`command`] - Workspaces, process execution and the task context
//! - [`dispatch`] - Task registry and submission
//! - [`bundle`] - The bundle building task and publishing
//!
//! # Build Workflow
//!
//! 1. **Submit**: a `BUNDLE_BUILDING` task with a [`bundle::BundleBuildingContext`]
//! 2. **Workspace**: the dispatcher creates a fresh directory for the execution
//! 3. **Canonical**: the bundle's layer is exported from PostGIS into a GeoPackage,
//!    filtered to the organization's fence
//! 4. **Derive**: each other requested format is converted from the GeoPackage
//! 5. **Publish**: each derived format replaces `dist/ORG<org>/BND<bundle>/<FORMAT>`
//! 6. **Cleanup**: the workspace is removed
//!
//! # Example
//!
//! ```rust,no_run
//! use geobundle::adapters::repository::create_repositories;
//! use geobundle::adapters::storage::create_blob_storage;
//! use geobundle::config::load_config;
//! use geobundle::core::bundle::{BundleBuildingContext, BundleJob, Publisher, TASK_NAME};
//! use geobundle::core::command::ProcessRunner;
//! use geobundle::core::dataset::PostgresDataSource;
//! use geobundle::core::dispatch::{TaskDispatcher, TaskPayload};
//! use geobundle::domain::{BundleId, GeometryFormat};
//! use std::str::FromStr;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("geobundle.toml")?;
//! let repositories = create_repositories(&config.database).await?;
//! let publisher = Publisher::new(
//!     create_blob_storage(&config.storage),
//!     config.storage.cache_control.clone(),
//! );
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let mut dispatcher =
//!     TaskDispatcher::new(Arc::new(ProcessRunner), config.workspace.clone(), shutdown_rx);
//! dispatcher.register(Arc::new(BundleJob::new(
//!     repositories.layers.clone(),
//!     publisher,
//!     PostgresDataSource::new(config.database.connection_string.clone()),
//!     config.conversion.program.clone(),
//! )));
//!
//! let bundle_id = BundleId::from_str("0d6f4a0e-0c1f-4c55-9d59-3c0d2b8d6c11")?;
//! let bundle = repositories.bundles.get_bundle_by_id(&bundle_id).await?;
//! let payload = BundleBuildingContext::new(
//!     bundle,
//!     vec![GeometryFormat::GeoPackage, GeometryFormat::MapboxVectorTiles],
//! );
//!
//! let outcome = dispatcher.submit(TASK_NAME, TaskPayload::new(payload)).await?;
//! println!("Job {} took {:?}", outcome.job_id, outcome.duration);
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod command;
pub mod dataset;
pub mod dispatch;
