//! Geometry output formats
//!
//! Every format carries fixed metadata: the driver name passed to the
//! conversion program, a short name used in directory names, the file
//! extension, the content type used when publishing, and any dataset
//! creation options the driver needs.

use crate::domain::{BundleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported geometry output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GeometryFormat {
    /// Mapbox vector tiles (directory of tiles)
    MapboxVectorTiles,
    /// OGC GeoPackage
    GeoPackage,
    /// ESRI Shapefile
    EsriShapefile,
    /// GeoJSON
    GeoJson,
}

/// Static metadata for a geometry format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatProperty {
    /// Driver name as passed to the conversion program
    pub format_name: &'static str,
    /// Short name used in directory and destination names
    pub short_name: &'static str,
    /// File extension including the leading dot, empty for directory outputs
    pub extension: &'static str,
    /// Content type of the published files
    pub content_type: &'static str,
    /// Dataset creation options
    pub command_options: &'static [&'static str],
}

const MVT: FormatProperty = FormatProperty {
    format_name: "MVT",
    short_name: "MVT",
    extension: "",
    content_type: "application/x-protobuf",
    command_options: &[
        "-dsco",
        "MINZOOM=14",
        "-dsco",
        "MAXZOOM=16",
        "-dsco",
        "COMPRESS=NO",
        "-dsco",
        "MAX_SIZE=25000000",
    ],
};

const GPKG: FormatProperty = FormatProperty {
    format_name: "GPKG",
    short_name: "GPKG",
    extension: ".gpkg",
    content_type: "application/vnd.sqlite3",
    command_options: &[],
};

const SHP: FormatProperty = FormatProperty {
    format_name: "ESRI Shapefile",
    short_name: "SHP",
    extension: ".shp",
    content_type: "x-gis/x-shapefile",
    command_options: &[],
};

const GEOJSON: FormatProperty = FormatProperty {
    format_name: "GeoJSON",
    short_name: "JSON",
    extension: ".json",
    content_type: "application/json",
    command_options: &[],
};

impl GeometryFormat {
    /// The format every bundle is built into first and derived from afterwards
    pub const CANONICAL: GeometryFormat = GeometryFormat::GeoPackage;

    /// All formats in declaration order
    pub const ALL: [GeometryFormat; 4] = [
        GeometryFormat::MapboxVectorTiles,
        GeometryFormat::GeoPackage,
        GeometryFormat::EsriShapefile,
        GeometryFormat::GeoJson,
    ];

    /// Returns the static metadata for this format
    pub const fn property(&self) -> &'static FormatProperty {
        match self {
            GeometryFormat::MapboxVectorTiles => &MVT,
            GeometryFormat::GeoPackage => &GPKG,
            GeometryFormat::EsriShapefile => &SHP,
            GeometryFormat::GeoJson => &GEOJSON,
        }
    }

    /// Short name, e.g. `GPKG`
    pub const fn short_name(&self) -> &'static str {
        self.property().short_name
    }

    /// Whether this is the canonical format
    pub fn is_canonical(&self) -> bool {
        *self == Self::CANONICAL
    }

    /// Parses a comma-separated list such as `gpkg,mvt,geojson`
    ///
    /// Empty entries are ignored; order and duplicates are preserved.
    pub fn parse_list(input: &str) -> Result<Vec<GeometryFormat>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(GeometryFormat::from_str)
            .collect()
    }
}

impl fmt::Display for GeometryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for GeometryFormat {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mvt" | "mapboxvectortiles" | "vector-tiles" => Ok(Self::MapboxVectorTiles),
            "gpkg" | "geopackage" => Ok(Self::GeoPackage),
            "shp" | "shapefile" | "esri shapefile" | "esrishapefile" => Ok(Self::EsriShapefile),
            "json" | "geojson" => Ok(Self::GeoJson),
            _ => Err(BundleError::Validation(format!(
                "Invalid geometry format: {s}. Expected one of: mvt, gpkg, shp, geojson"
            ))),
        }
    }
}

impl TryFrom<String> for GeometryFormat {
    type Error = BundleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GeometryFormat> for String {
    fn from(format: GeometryFormat) -> Self {
        format.short_name().to_string()
    }
}
