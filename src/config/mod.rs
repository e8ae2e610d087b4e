//! Configuration management for geobundle.
//!
//! # Overview
//!
//! geobundle uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GEOBUNDLE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PostgreSQLConfig`] - PostGIS database holding layers and organizations
//! - [`ConversionConfig`] - Conversion program (`ogr2ogr`)
//! - [`StorageConfig`] - Publish backend and cache headers
//! - [`WorkspaceConfig`] - Per-job scratch directories
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [database]
//! connection_string = "${GEOBUNDLE_DATABASE_URL}"
//! ssl_mode = "require"
//!
//! [conversion]
//! program = "/usr/bin/ogr2ogr"
//!
//! [storage]
//! backend = "local"
//! local_path = "/srv/bundles"
//!
//! [workspace]
//! root = "/var/tmp/geobundle"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ConversionConfig, GeobundleConfig, LoggingConfig, PostgreSQLConfig,
    StorageBackend, StorageConfig, WorkspaceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
