//! Domain models and types for geobundle.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`OrganizationId`], [`BundleId`], [`LayerId`])
//! - **Domain models** ([`Bundle`], [`Layer`])
//! - **Geometry formats** ([`GeometryFormat`]) with their static metadata table
//! - **Error types** ([`BundleError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! Identifiers wrap UUIDs, so an organization id can never be confused with a
//! bundle id and its textual form is always a plain hyphenated UUID:
//!
//! ```rust
//! use geobundle::domain::{BundleId, OrganizationId};
//! use std::str::FromStr;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let organization = OrganizationId::from_str("5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a")?;
//! let bundle = BundleId::new_v4();
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: OrganizationId = bundle;
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod errors;
pub mod format;
pub mod ids;
pub mod layer;
pub mod result;

// Re-export commonly used types for convenience
pub use bundle::{Bundle, BundleBuilder};
pub use errors::BundleError;
pub use format::{FormatProperty, GeometryFormat};
pub use ids::{BundleId, LayerId, OrganizationId};
pub use layer::Layer;
pub use result::Result;
