//! Dataset endpoints and conversion command assembly
//!
//! A conversion reads one [`DataSource`] and writes another. The
//! [`VectorDatasetBuilder`] turns a pair of endpoints, plus an optional
//! layer filter, into a frozen [`CommandInfo`] for the conversion program.

pub mod builder;
pub mod source;

pub use builder::{Argument, BuilderOptions, CommandInfo, VectorDatasetBuilder};
pub use source::{BundleLayerSource, DataSource, FileDataSource, PostgresDataSource};
