//! Bundle domain model
//!
//! A bundle is an organization-owned collection of map layers that is exported
//! into one or more geometry formats.

use super::ids::{BundleId, LayerId, OrganizationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a bundle of layers made by an organization
///
/// The export pipeline only reads bundles; they are administered elsewhere.
///
/// # Examples
///
/// ```
/// use geobundle::domain::{Bundle, BundleId, LayerId, OrganizationId};
///
/// let bundle = Bundle::builder()
///     .id(BundleId::new_v4())
///     .organization_id(OrganizationId::new_v4())
///     .layer_id(LayerId::new_v4())
///     .name("Foundation risk")
///     .build()
///     .unwrap();
/// assert_eq!(bundle.to_string(), bundle.id.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Unique identifier
    pub id: BundleId,

    /// Organization which owns this bundle
    pub organization_id: OrganizationId,

    /// Name of this bundle
    pub name: String,

    /// The layer exported by this bundle
    pub layer_id: LayerId,

    /// The date this bundle was created
    pub create_date: DateTime<Utc>,

    /// The date this bundle was last updated
    pub update_date: Option<DateTime<Utc>>,

    /// The date this bundle was deleted
    pub delete_date: Option<DateTime<Utc>>,

    /// The date this bundle was last built
    pub complete_date: Option<DateTime<Utc>>,
}

impl Bundle {
    /// Returns a builder for constructing a bundle
    pub fn builder() -> BundleBuilder {
        BundleBuilder::default()
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Builder for constructing Bundle instances
#[derive(Debug, Default)]
pub struct BundleBuilder {
    id: Option<BundleId>,
    organization_id: Option<OrganizationId>,
    name: Option<String>,
    layer_id: Option<LayerId>,
    create_date: Option<DateTime<Utc>>,
    complete_date: Option<DateTime<Utc>>,
}

impl BundleBuilder {
    /// Sets the bundle ID
    pub fn id(mut self, id: BundleId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the owning organization
    pub fn organization_id(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Sets the bundle name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the layer
    pub fn layer_id(mut self, layer_id: LayerId) -> Self {
        self.layer_id = Some(layer_id);
        self
    }

    /// Sets the creation date (defaults to now)
    pub fn create_date(mut self, create_date: DateTime<Utc>) -> Self {
        self.create_date = Some(create_date);
        self
    }

    /// Sets the last build date
    pub fn complete_date(mut self, complete_date: DateTime<Utc>) -> Self {
        self.complete_date = Some(complete_date);
        self
    }

    /// Builds the bundle
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing
    pub fn build(self) -> Result<Bundle, String> {
        Ok(Bundle {
            id: self.id.ok_or("Bundle ID is required")?,
            organization_id: self.organization_id.ok_or("Organization ID is required")?,
            name: self.name.unwrap_or_default(),
            layer_id: self.layer_id.ok_or("Layer ID is required")?,
            create_date: self.create_date.unwrap_or_else(Utc::now),
            update_date: None,
            delete_date: None,
            complete_date: self.complete_date,
        })
    }
}
