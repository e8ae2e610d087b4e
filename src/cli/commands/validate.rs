//! Validate config command implementation

use crate::adapters::repository::create_repositories;
use crate::config::load_config;
use crate::config::schema::StorageBackend;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Also connect to the database
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    /// With `--check-connection` an unreachable database exits with 4.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Database: {}",
            config.database.connection_string.expose_secret().redacted()
        );
        println!("  SSL Mode: {}", config.database.ssl_mode);
        println!("  Max Connections: {}", config.database.max_connections);
        println!("  Conversion Program: {}", config.conversion.program);
        match config.storage.backend {
            StorageBackend::Local => {
                println!("  Storage: local ({})", config.storage.local_path)
            }
            StorageBackend::Null => println!("  Storage: null (publishes discarded)"),
        }
        println!("  Cache-Control: {}", config.storage.cache_control);
        println!("  Workspace Root: {}", config.workspace.root.display());
        if config.workspace.keep_workspace {
            println!("  Workspaces are kept after each job");
        }
        println!();

        if self.check_connection {
            let result = match create_repositories(&config.database).await {
                Ok(repositories) => repositories.bundles.test_connection().await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                crate::log_error_with_context!(e, "Database connection check failed");
                println!("❌ Database is unreachable");
                println!("   Error: {e}");
                return Ok(4);
            }
            println!("✅ Database connection OK");
        }

        Ok(0)
    }
}
