//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management and output
//! formatting.

use crate::error::CliError;
use crate::stored::stored_registry;
use pathhist::database::{resolve_data_dir, DATABASE_FILE};
use pathhist::{Config, ConfigBuilder, Database, DatabaseConfig, PathHistory};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Additional configuration file.
    pub config: Option<PathBuf>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory from global options.
///
/// Priority: `--data-dir` (or `PATHHIST_DATA_DIR`) > `~/.pathhist`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. The `--config` file (highest priority among files)
/// 2. `pathhist.local.yaml` / `pathhist.yaml` found from the working directory
/// 3. `config.yaml` in the data directory
///
/// `PATHHIST_*` environment variables override every file.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = data_dir(global)?;
    let mut builder = ConfigBuilder::new().with_data_dir(&data_dir);

    if let Some(ref file) = global.config {
        if !file.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Configuration file not found: {}",
                file.display()
            )));
        }
        builder = builder.with_file(file);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE);

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_timeout(), |secs| Duration::from_secs(secs.into()));

    let db_config = DatabaseConfig::new(db_path)
        .with_table(config.table())
        .with_busy_timeout(busy_timeout);

    Database::open(db_config).map_err(CliError::from)
}

/// Load configuration and wire a [`PathHistory`] over record-backed owners.
pub fn open_path_history(global: &GlobalOptions) -> Result<PathHistory, CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    let prefixes = config
        .prefix_table()
        .map_err(|e| CliError::Config(e.to_string()))?;

    PathHistory::from_config(&config, db, stored_registry(&prefixes)).map_err(CliError::from)
}

/// Format a record timestamp (Unix seconds) for display.
pub fn format_timestamp(created_at: i64) -> String {
    chrono::DateTime::from_timestamp(created_at, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| created_at.to_string())
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
