//! Conversion command assembly
//!
//! # Example
//!
//! ```rust
//! use geobundle::core::dataset::{BuilderOptions, FileDataSource, VectorDatasetBuilder};
//! use geobundle::domain::GeometryFormat;
//!
//! let canonical = FileDataSource::new(GeometryFormat::GeoPackage, "/ws/GPKG", "bundle");
//! let output = FileDataSource::new(GeometryFormat::GeoJson, "/ws/JSON", "bundle");
//!
//! let command = VectorDatasetBuilder::new(BuilderOptions::for_format(GeometryFormat::GeoJson))
//!     .input_dataset(canonical)
//!     .output_dataset(output)
//!     .build("GeoJSON")
//!     .unwrap();
//!
//! assert_eq!(
//!     command.exposed_args().collect::<Vec<_>>(),
//!     vec!["/ws/JSON/bundle.json", "-f", "GeoJSON", "/ws/GPKG/bundle.gpkg"]
//! );
//! ```

use crate::config::{secret_string, SecretString};
use crate::core::dataset::source::{DataSource, FileDataSource};
use crate::domain::{BundleError, GeometryFormat, Result};
use secrecy::ExposeSecret;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default conversion program
pub const DEFAULT_PROGRAM: &str = "ogr2ogr";

/// A single command line argument
///
/// Sensitive arguments carry credentials and are redacted when displayed.
#[derive(Debug, Clone)]
pub enum Argument {
    /// Ordinary argument
    Plain(String),
    /// Argument containing credentials
    Sensitive(SecretString),
}

impl Argument {
    /// Wrap a value containing credentials
    pub fn sensitive(value: String) -> Self {
        Argument::Sensitive(secret_string(value))
    }

    /// The value passed to the process
    pub fn expose(&self) -> &str {
        match self {
            Argument::Plain(value) => value,
            Argument::Sensitive(value) => value.expose_secret().as_ref(),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Plain(value.to_string())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Argument::Plain(value) => value.clone(),
            Argument::Sensitive(value) => value.expose_secret().redacted(),
        };
        if text.is_empty() || text.contains(char::is_whitespace) {
            write!(f, "\"{}\"", text.replace('"', "\\\""))
        } else {
            f.write_str(&text)
        }
    }
}

/// Format specific options for the builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Arguments inserted after the output format
    pub additional_options: Vec<String>,
}

impl BuilderOptions {
    /// Options holding the dataset creation options of `format`
    pub fn for_format(format: GeometryFormat) -> Self {
        Self {
            additional_options: format
                .property()
                .command_options
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A fully assembled conversion command
#[derive(Debug, Clone)]
pub struct CommandInfo {
    program: String,
    args: Vec<Argument>,
    output: PathBuf,
    format_name: String,
}

impl CommandInfo {
    /// Program to execute
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Arguments as passed to the process
    pub fn exposed_args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(Argument::expose)
    }

    /// Path the conversion writes
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Driver name of the output format
    pub fn format_name(&self) -> &str {
        &self.format_name
    }
}

impl fmt::Display for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Builds conversion commands for vector datasets
#[derive(Debug, Clone)]
pub struct VectorDatasetBuilder {
    program: String,
    options: BuilderOptions,
    input: Option<DataSource>,
    output: Option<FileDataSource>,
    layers: Option<DataSource>,
}

impl VectorDatasetBuilder {
    /// Create a builder using the default program
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            options,
            input: None,
            output: None,
            layers: None,
        }
    }

    /// Override the conversion program
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the dataset to read
    pub fn input_dataset(mut self, source: impl Into<DataSource>) -> Self {
        self.input = Some(source.into());
        self
    }

    /// Set the dataset to write
    pub fn output_dataset(mut self, sink: FileDataSource) -> Self {
        self.output = Some(sink);
        self
    }

    /// Restrict the input to a layer selection
    pub fn input_layers(mut self, source: impl Into<DataSource>) -> Self {
        self.layers = Some(source.into());
        self
    }

    /// Assemble the command for the output driver `format_name`
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Configuration` if an endpoint is missing or the
    /// input endpoint cannot be read as a dataset.
    pub fn build(self, format_name: &str) -> Result<CommandInfo> {
        let output = self.output.ok_or_else(|| {
            BundleError::Configuration("Output dataset was not set".to_string())
        })?;
        let input = self
            .input
            .ok_or_else(|| BundleError::Configuration("Input dataset was not set".to_string()))?;
        let source = input.dataset_argument().ok_or_else(|| {
            BundleError::Configuration(format!(
                "A {} source cannot be used as input dataset",
                input.kind()
            ))
        })?;

        let output_path = output.path();
        let mut args = Vec::with_capacity(4 + self.options.additional_options.len());
        args.push(Argument::Plain(output_path.to_string_lossy().into_owned()));
        args.push(Argument::from("-f"));
        args.push(Argument::from(format_name));
        args.extend(self.options.additional_options.into_iter().map(Argument::Plain));
        args.push(source);
        if let Some(layers) = &self.layers {
            args.extend(layers.layer_arguments());
        }

        Ok(CommandInfo {
            program: self.program,
            args,
            output: output_path,
            format_name: format_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::source::{BundleLayerSource, PostgresDataSource};
    use crate::domain::{Bundle, BundleId, Layer, LayerId, OrganizationId};

    fn database() -> PostgresDataSource {
        PostgresDataSource::new(secret_string(
            "postgresql://gis:secret@db:5432/fundermaps".to_string(),
        ))
    }

    fn args(command: &CommandInfo) -> Vec<String> {
        command.exposed_args().map(str::to_string).collect()
    }

    #[test]
    fn test_canonical_argument_order() {
        let bundle = Bundle::builder()
            .id(BundleId::new_v4())
            .organization_id(OrganizationId::new_v4())
            .layer_id(LayerId::new_v4())
            .name("Risk")
            .build()
            .unwrap();
        let layer = Layer::new(bundle.layer_id, "incident", "Incidents");
        let output = FileDataSource::new(GeometryFormat::GeoPackage, "/ws/GPKG", "b");

        let command = VectorDatasetBuilder::new(BuilderOptions::default())
            .input_dataset(database())
            .output_dataset(output)
            .input_layers(BundleLayerSource::new(&bundle, &layer, "/ws"))
            .build("GPKG")
            .unwrap();

        let args = args(&command);
        assert_eq!(command.program(), "ogr2ogr");
        assert_eq!(args[0], "/ws/GPKG/b.gpkg");
        assert_eq!(args[1..3], ["-f", "GPKG"]);
        assert_eq!(args[3], "PG:postgresql://gis:secret@db:5432/fundermaps");
        assert_eq!(args[4], "-sql");
        assert!(args[5].starts_with("SELECT s.* FROM maplayer.\"incident\""));
        assert_eq!(args[6..], ["-nln", "incident"]);
        assert_eq!(command.output(), Path::new("/ws/GPKG/b.gpkg"));
    }

    #[test]
    fn test_format_options_follow_format_name() {
        let input = FileDataSource::new(GeometryFormat::GeoPackage, "/ws/GPKG", "b");
        let output = FileDataSource::new(GeometryFormat::MapboxVectorTiles, "/ws/MVT", "b");

        let command = VectorDatasetBuilder::new(BuilderOptions::for_format(
            GeometryFormat::MapboxVectorTiles,
        ))
        .program("/opt/gdal/bin/ogr2ogr")
        .input_dataset(input)
        .output_dataset(output)
        .build("MVT")
        .unwrap();

        let args = args(&command);
        assert_eq!(command.program(), "/opt/gdal/bin/ogr2ogr");
        assert_eq!(args.len(), 12);
        assert_eq!(args[..3], ["/ws/MVT/b", "-f", "MVT"]);
        assert_eq!(args[3..5], ["-dsco", "MINZOOM=14"]);
        assert_eq!(args[11], "/ws/GPKG/b.gpkg");
        assert!(!args.contains(&"-nln".to_string()));
    }

    #[test]
    fn test_missing_endpoints() {
        let output = FileDataSource::new(GeometryFormat::GeoJson, "/ws/JSON", "b");
        let result = VectorDatasetBuilder::new(BuilderOptions::default())
            .output_dataset(output)
            .build("GeoJSON");
        assert!(matches!(result, Err(BundleError::Configuration(_))));

        let result = VectorDatasetBuilder::new(BuilderOptions::default())
            .input_dataset(database())
            .build("GeoJSON");
        assert!(matches!(result, Err(BundleError::Configuration(_))));
    }

    #[test]
    fn test_display_redacts_credentials() {
        let output = FileDataSource::new(GeometryFormat::EsriShapefile, "/ws/SHP", "b");
        let command = VectorDatasetBuilder::new(BuilderOptions::default())
            .input_dataset(database())
            .output_dataset(output)
            .build("ESRI Shapefile")
            .unwrap();

        let rendered = command.to_string();
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("\"ESRI Shapefile\""));
        assert!(rendered.contains("PG:postgresql://***@db:5432/fundermaps"));
    }
}
