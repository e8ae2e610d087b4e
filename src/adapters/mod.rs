//! External system integrations for geobundle.
//!
//! - [`repository`] - Lookup traits for layers and bundles
//! - [`postgresql`] - PostgreSQL (PostGIS) implementation of the repositories
//! - [`storage`] - Blob storage the finished formats are published to
//!
//! # Design Pattern
//!
//! Adapters isolate external systems behind `async_trait` traits so the job
//! pipeline can run against recording stubs in tests. Factories hand out
//! `Arc<dyn Trait + Send + Sync>` built from configuration.

pub mod postgresql;
pub mod repository;
pub mod storage;
