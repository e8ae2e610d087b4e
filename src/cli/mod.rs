//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for geobundle using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// geobundle - map bundle export tool
#[derive(Parser, Debug)]
#[command(name = "geobundle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "geobundle.toml", env = "GEOBUNDLE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GEOBUNDLE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a bundle into one or more formats and publish them
    Build(commands::build::BuildArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = "0d6f4a0e-0c1f-4c55-9d59-3c0d2b8d6c11";

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::parse_from(["geobundle", "build", "--bundle", BUNDLE]);
        assert_eq!(cli.config, "geobundle.toml");
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.bundle, BUNDLE);
                assert_eq!(args.format, "gpkg,mvt,shp,geojson");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_build_formats() {
        let cli = Cli::parse_from([
            "geobundle",
            "--config",
            "custom.toml",
            "build",
            "-b",
            BUNDLE,
            "--format",
            "gpkg,mvt",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Build(ref args) if args.format == "gpkg,mvt"));
    }

    #[test]
    fn test_cli_build_requires_bundle() {
        assert!(Cli::try_parse_from(["geobundle", "build"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["geobundle", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(ref args) if !args.check_connection));
    }

    #[test]
    fn test_cli_parse_validate_check_connection() {
        let cli = Cli::parse_from(["geobundle", "validate-config", "--check-connection"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(ref args) if args.check_connection));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["geobundle", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
