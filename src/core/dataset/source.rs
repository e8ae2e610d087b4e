//! Conversion endpoints

use crate::config::SecretString;
use crate::core::dataset::builder::Argument;
use crate::domain::ids::OrganizationId;
use crate::domain::{Bundle, GeometryFormat, Layer};
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};

/// A conversion endpoint
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Live PostGIS database
    Database(PostgresDataSource),
    /// Organization-filtered view over one layer table
    Layer(BundleLayerSource),
    /// A file (or directory, for tile output) on disk
    File(FileDataSource),
}

impl DataSource {
    /// Dataset argument for this endpoint, `None` for layer filters
    pub fn dataset_argument(&self) -> Option<Argument> {
        match self {
            DataSource::Database(source) => Some(source.argument()),
            DataSource::File(source) => Some(Argument::Plain(
                source.path().to_string_lossy().into_owned(),
            )),
            DataSource::Layer(_) => None,
        }
    }

    /// Layer selection arguments, empty unless this is a layer filter
    pub fn layer_arguments(&self) -> Vec<Argument> {
        match self {
            DataSource::Layer(source) => source.arguments(),
            _ => Vec::new(),
        }
    }

    /// Short description for logs
    pub fn kind(&self) -> &'static str {
        match self {
            DataSource::Database(_) => "database",
            DataSource::Layer(_) => "layer",
            DataSource::File(_) => "file",
        }
    }
}

/// PostgreSQL database endpoint
#[derive(Debug, Clone)]
pub struct PostgresDataSource {
    connection_string: SecretString,
}

impl PostgresDataSource {
    /// Wrap a libpq connection string or URI
    pub fn new(connection_string: SecretString) -> Self {
        Self { connection_string }
    }

    fn argument(&self) -> Argument {
        let dataset = format!("PG:{}", self.connection_string.expose_secret().as_ref());
        Argument::sensitive(dataset)
    }
}

impl From<PostgresDataSource> for DataSource {
    fn from(source: PostgresDataSource) -> Self {
        DataSource::Database(source)
    }
}

/// Restricts a conversion to the rows of one layer that intersect the
/// coverage polygon of the bundle's organization
#[derive(Debug, Clone)]
pub struct BundleLayerSource {
    query: String,
    output_name: String,
    workspace: PathBuf,
}

impl BundleLayerSource {
    /// Build the filter for `bundle` over `layer`
    pub fn new(bundle: &Bundle, layer: &Layer, workspace: impl Into<PathBuf>) -> Self {
        Self {
            query: layer_query(&layer.table_name, &bundle.organization_id),
            output_name: layer.slug().to_string(),
            workspace: workspace.into(),
        }
    }

    /// The SQL handed to the conversion program
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Name of the layer in the output dataset
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Workspace of the job that owns this source
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![
            Argument::from("-sql"),
            Argument::Plain(self.query.clone()),
            Argument::from("-nln"),
            Argument::Plain(self.output_name.clone()),
        ]
    }
}

impl From<BundleLayerSource> for DataSource {
    fn from(source: BundleLayerSource) -> Self {
        DataSource::Layer(source)
    }
}

/// The conversion program does not accept bind parameters, so the organization
/// id is rendered from its UUID and the table name is quoted as an identifier.
fn layer_query(table_name: &str, organization_id: &OrganizationId) -> String {
    format!(
        "SELECT s.* FROM maplayer.{} AS s \
         JOIN application.organization AS o ON o.id = '{}'::uuid \
         WHERE ST_Intersects(o.fence, s.geom)",
        quote_identifier(table_name),
        organization_id.as_uuid().hyphenated()
    )
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A dataset file at `<prefix>/<name><extension>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDataSource {
    /// Format of the file
    pub format: GeometryFormat,
    /// Directory holding the file
    pub path_prefix: PathBuf,
    /// Base name without extension
    pub name: String,
    /// Extension including the leading dot, may be empty
    pub extension: String,
}

impl FileDataSource {
    /// File for `format` named `name` inside `path_prefix`, using the format's extension
    pub fn new(
        format: GeometryFormat,
        path_prefix: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            format,
            path_prefix: path_prefix.into(),
            name: name.into(),
            extension: format.property().extension.to_string(),
        }
    }

    /// Full path of the dataset
    pub fn path(&self) -> PathBuf {
        self.path_prefix.join(format!("{}{}", self.name, self.extension))
    }
}

impl From<FileDataSource> for DataSource {
    fn from(source: FileDataSource) -> Self {
        DataSource::File(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::{BundleId, LayerId};
    use std::str::FromStr;

    fn bundle() -> Bundle {
        Bundle::builder()
            .id(BundleId::new_v4())
            .organization_id(
                OrganizationId::from_str("5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a").unwrap(),
            )
            .layer_id(LayerId::new_v4())
            .name("Risk")
            .build()
            .unwrap()
    }

    #[test]
    fn test_layer_query_filters_on_organization() {
        let layer = Layer::new(LayerId::new_v4(), "incident", "Incidents");
        let source = BundleLayerSource::new(&bundle(), &layer, "/tmp/ws");

        assert_eq!(
            source.query(),
            "SELECT s.* FROM maplayer.\"incident\" AS s \
             JOIN application.organization AS o \
             ON o.id = '5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a'::uuid \
             WHERE ST_Intersects(o.fence, s.geom)"
        );
        assert_eq!(source.output_name(), "incident");
        assert_eq!(source.workspace(), Path::new("/tmp/ws"));
    }

    #[test]
    fn test_table_name_is_quoted() {
        let layer = Layer::new(LayerId::new_v4(), "bad\"; DROP TABLE x; --", "Bad");
        let source = BundleLayerSource::new(&bundle(), &layer, "/tmp/ws");
        assert!(source
            .query()
            .contains("maplayer.\"bad\"\"; DROP TABLE x; --\" AS s"));
    }

    #[test]
    fn test_layer_source_has_no_dataset_argument() {
        let layer = Layer::new(LayerId::new_v4(), "incident", "Incidents");
        let source: DataSource = BundleLayerSource::new(&bundle(), &layer, "/tmp/ws").into();

        assert!(source.dataset_argument().is_none());
        let args: Vec<String> = source
            .layer_arguments()
            .iter()
            .map(|a| a.expose().to_string())
            .collect();
        assert_eq!(args[0], "-sql");
        assert_eq!(args[2], "-nln");
        assert_eq!(args[3], "incident");
    }

    #[test]
    fn test_file_source_path() {
        let file = FileDataSource::new(GeometryFormat::GeoPackage, "/tmp/ws/GPKG", "abc");
        assert_eq!(file.path(), PathBuf::from("/tmp/ws/GPKG/abc.gpkg"));

        let tiles = FileDataSource::new(GeometryFormat::MapboxVectorTiles, "/tmp/ws/MVT", "abc");
        assert_eq!(tiles.path(), PathBuf::from("/tmp/ws/MVT/abc"));
    }

    #[test]
    fn test_database_source_is_sensitive() {
        let source: DataSource =
            PostgresDataSource::new(secret_string("postgresql://u:pw@db/gis".to_string())).into();
        let argument = source.dataset_argument().unwrap();

        assert_eq!(argument.expose(), "PG:postgresql://u:pw@db/gis");
        assert!(!argument.to_string().contains("pw"));
        assert!(source.layer_arguments().is_empty());
    }
}
