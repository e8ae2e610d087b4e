//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "geobundle.toml")]
    pub output: String,

    /// Include comments explaining every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set GEOBUNDLE_DATABASE_URL (or edit {})", self.output);
                println!("  2. Validate configuration: geobundle validate-config");
                println!("  3. Build a bundle: geobundle build --bundle <uuid> --format gpkg,mvt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# geobundle configuration

[application]
log_level = "info"

[database]
connection_string = "${GEOBUNDLE_DATABASE_URL}"
ssl_mode = "prefer"

[conversion]
program = "ogr2ogr"

[storage]
backend = "local"
local_path = "/var/lib/geobundle/storage"
cache_control = "public, max-age=10800"

[workspace]
keep_workspace = false

[logging]
local_enabled = false
local_path = "/var/log/geobundle"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# geobundle configuration
#
# Values may reference environment variables as ${NAME}. Any setting can also
# be overridden with GEOBUNDLE_<SECTION>_<KEY>, e.g. GEOBUNDLE_STORAGE_BACKEND.

[application]
# trace | debug | info | warn | error
log_level = "info"

[database]
# PostGIS database holding maplayer.* tables and application.organization
connection_string = "${GEOBUNDLE_DATABASE_URL}"
max_connections = 4
connection_timeout_seconds = 30
statement_timeout_seconds = 60
# disable | prefer | require
ssl_mode = "prefer"

[conversion]
# Name or absolute path of the GDAL vector conversion utility
program = "ogr2ogr"

[storage]
# local: copy published formats below local_path
# null: discard publishes (dry runs)
backend = "local"
local_path = "/var/lib/geobundle/storage"
cache_control = "public, max-age=10800"

[workspace]
# Each job gets <root>/<job id>, removed when the job ends
# root = "/var/tmp/geobundle"
keep_workspace = false

[logging]
# JSON log file with rotation, in addition to console output
local_enabled = false
local_path = "/var/log/geobundle"
# daily | hourly
local_rotation = "daily"
"#
        .to_string()
    }
}
