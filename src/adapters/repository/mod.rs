//! Repository abstraction layer
//!
//! Read access to the layer catalogue and the bundle table, plus the single
//! write the CLI performs after a successful build.

pub mod factory;
pub mod traits;

pub use factory::create_repositories;
pub use traits::{BundleRepository, LayerRepository, Repositories};
