//! Blob storage the finished formats are published to
//!
//! Publishing is a directory-level operation: a destination prefix such as
//! `dist/ORG<org>/BND<bundle>/MVT` is removed and then refilled from a local
//! directory.

pub mod factory;
pub mod local;
pub mod null;
pub mod traits;

pub use factory::create_blob_storage;
pub use local::LocalBlobStorage;
pub use null::NullBlobStorage;
pub use traits::{BlobStorage, StorageObject};
