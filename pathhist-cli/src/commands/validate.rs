//! Command to validate pathhist configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use pathhist::config::{ConfigLoader, ConfigValidator};
use pathhist::Config;
use std::path::{Path, PathBuf};

/// Validate configuration and print the effective prefix table.
///
/// Without an argument the merged configuration (files plus environment)
/// is checked; with one, only that file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate on its own
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = match self.config_path {
            Some(ref path) => {
                if !path.exists() {
                    return Err(CliError::InvalidArguments(format!(
                        "File not found: {}",
                        path.display()
                    )));
                }
                Self::check_file(path)?
            }
            None => match load_configuration(global) {
                Ok(config) => config,
                Err(CliError::Config(message)) => {
                    eprintln!("Validation error: {message}");
                    return Err(CliError::SemanticFailure(
                        "Configuration validation failed".to_string(),
                    ));
                }
                Err(other) => return Err(other),
            },
        };

        let prefixes = config
            .prefix_table()
            .map_err(|e| CliError::Config(e.to_string()))?;

        println!("Configuration is valid");
        println!("table: {}", config.table());
        println!("redirect_status: {}", config.redirect_status());
        if prefixes.is_empty() {
            println!("prefixes: none");
        }
        for entry in prefixes.entries() {
            for tag in entry.types() {
                let handler = entry.handler_for(&tag).unwrap_or_default();
                println!("{}\t{tag}\t{handler}", entry.prefix());
            }
        }
        Ok(())
    }

    fn check_file(path: &Path) -> Result<Config, CliError> {
        let config = match ConfigLoader::load_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        if let Err(e) = ConfigValidator::validate(&config) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(
                "Configuration validation failed".to_string(),
            ));
        }
        Ok(config)
    }
}
