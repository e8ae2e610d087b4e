//! Bundle export job
//!
//! Builds a bundle into the canonical GeoPackage from the database, derives
//! every other requested format from that file, and publishes each derived
//! format to blob storage.

pub mod job;
pub mod payload;
pub mod publish;

pub use job::{BuildState, BundleJob};
pub use payload::{BundleBuildingContext, TASK_NAME};
pub use publish::{destination_path, Publisher};
