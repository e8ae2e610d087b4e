//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{GeobundleConfig, StorageBackend};
use super::secret_string;
use crate::domain::errors::BundleError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GeobundleConfig
/// 4. Applies environment variable overrides (GEOBUNDLE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `BundleError::Configuration` if the file cannot be read or parsed,
/// a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use geobundle::config::loader::load_config;
///
/// let config = load_config("geobundle.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GeobundleConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BundleError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BundleError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GeobundleConfig = toml::from_str(&contents)
        .map_err(|e| BundleError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BundleError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BundleError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BundleError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using GEOBUNDLE_* prefix
///
/// Environment variables follow the pattern: GEOBUNDLE_<SECTION>_<KEY>
/// For example: GEOBUNDLE_DATABASE_CONNECTION_STRING, GEOBUNDLE_STORAGE_BACKEND
fn apply_env_overrides(config: &mut GeobundleConfig) -> Result<()> {
    if let Ok(val) = std::env::var("GEOBUNDLE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Database overrides
    if let Ok(val) = std::env::var("GEOBUNDLE_DATABASE_CONNECTION_STRING") {
        config.database.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("GEOBUNDLE_DATABASE_MAX_CONNECTIONS") {
        if let Ok(max) = val.parse() {
            config.database.max_connections = max;
        }
    }
    if let Ok(val) = std::env::var("GEOBUNDLE_DATABASE_SSL_MODE") {
        config.database.ssl_mode = val;
    }

    if let Ok(val) = std::env::var("GEOBUNDLE_CONVERSION_PROGRAM") {
        config.conversion.program = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("GEOBUNDLE_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "local" => StorageBackend::Local,
            "null" => StorageBackend::Null,
            other => {
                return Err(BundleError::Configuration(format!(
                    "Invalid GEOBUNDLE_STORAGE_BACKEND '{other}'. Must be one of: local, null"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("GEOBUNDLE_STORAGE_LOCAL_PATH") {
        config.storage.local_path = val;
    }
    if let Ok(val) = std::env::var("GEOBUNDLE_STORAGE_CACHE_CONTROL") {
        config.storage.cache_control = val;
    }

    // Workspace overrides
    if let Ok(val) = std::env::var("GEOBUNDLE_WORKSPACE_ROOT") {
        config.workspace.root = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("GEOBUNDLE_WORKSPACE_KEEP_WORKSPACE") {
        config.workspace.keep_workspace = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GEOBUNDLE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("GEOBUNDLE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
