//! Bundle job payload

use crate::domain::{Bundle, GeometryFormat};

/// Name the bundle job is submitted under
pub const TASK_NAME: &str = "BUNDLE_BUILDING";

/// A request to build one bundle into a set of formats
#[derive(Debug, Clone, PartialEq)]
pub struct BundleBuildingContext {
    /// The bundle to build
    pub bundle: Bundle,
    /// Requested formats, in the order they should be produced
    pub formats: Vec<GeometryFormat>,
}

impl BundleBuildingContext {
    /// Create a payload
    pub fn new(bundle: Bundle, formats: Vec<GeometryFormat>) -> Self {
        Self { bundle, formats }
    }

    /// Formats derived from the canonical file
    ///
    /// Duplicates are dropped keeping the first occurrence, and the canonical
    /// format is removed since it is always built first.
    pub fn derived_formats(&self) -> Vec<GeometryFormat> {
        let mut derived: Vec<GeometryFormat> = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            if !format.is_canonical() && !derived.contains(format) {
                derived.push(*format);
            }
        }
        derived
    }
}
