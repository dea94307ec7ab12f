//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the pathhist data directory and database.

use crate::error::CliError;
use crate::utils::{data_dir, load_configuration, open_database, shorten_path, GlobalOptions};
use clap::Parser;
use pathhist::config::loader::USER_CONFIG_FILE;
use pathhist::config::schema::DEFAULT_LOCK_WAIT_SECONDS;
use pathhist::config::DEFAULT_REDIRECT_STATUS;
use pathhist::database::{DATABASE_FILE, DEFAULT_TABLE};
use pathhist::Config;
use std::fs;

/// Initialize pathhist data directory and database.
#[derive(Parser)]
#[command(about = "Initialize pathhist data directory and database")]
pub struct InitCommand {
    /// Create a default user configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

/// Contents of a freshly written user configuration.
fn default_config() -> Config {
    Config {
        table: Some(DEFAULT_TABLE.to_string()),
        redirect_status: Some(DEFAULT_REDIRECT_STATUS),
        prefixes: None,
        cascade_soft_deleted: Some(true),
        maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
    }
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Creates the directory named by `--data-dir` (or the default one).
    /// `--disable-autoinit` is ignored here.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = data_dir(global)?;
        let db_path = data_dir.join(DATABASE_FILE);
        let config_path = data_dir.join(USER_CONFIG_FILE);

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize pathhist in: {}", data_dir.display());
            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }
            if db_path.exists() {
                println!("  - Database already exists: {}", db_path.display());
            } else {
                println!("  - Create database: {}", db_path.display());
            }
            if self.with_config && !config_path.exists() {
                println!("  - Create configuration file: {}", config_path.display());
            }
            return Ok(());
        }

        let data_dir_created = !data_dir.exists();
        fs::create_dir_all(&data_dir)?;

        let config_created = self.with_config && !config_path.exists();
        if config_created {
            let yaml = serde_yaml::to_string(&default_config())
                .map_err(|e| CliError::Config(e.to_string()))?;
            fs::write(&config_path, yaml)?;
        }

        let database_created = !db_path.exists();
        let global = GlobalOptions {
            data_dir: Some(data_dir.clone()),
            disable_autoinit: false,
            ..global.clone()
        };
        let config = load_configuration(&global)?;
        let db = open_database(&global, &config)?;

        if !global.quiet {
            println!("Initialized pathhist in: {}", shorten_path(&data_dir));
            if data_dir_created {
                println!("  - Created data directory");
            }
            if database_created {
                println!("  - Created database");
            }
            println!("  - Path table: {}", db.table());
            if config_created {
                println!("  - Created default configuration file");
            } else if self.with_config {
                println!("  - Configuration file already exists (not overwritten)");
            }
        }

        Ok(())
    }
}
