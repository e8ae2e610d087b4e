//! PostgreSQL database integration
//!
//! Reads bundles and layers from the PostGIS database the map layers live in.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use models::{BundleRow, LayerRow};
