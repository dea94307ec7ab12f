//! Builder assembling the effective configuration.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from files, environment and code.
///
/// Sources are applied lowest precedence first: user config, project
/// `pathhist.yaml`, `pathhist.local.yaml`, an explicit file, `PATHHIST_*`
/// variables, and finally programmatic overrides. The result is validated.
///
/// # Examples
///
/// ```
/// use pathhist::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { redirect_status: Some(301), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.redirect_status(), 301);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    explicit_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// A builder that reads files relative to the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start the project config search from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// An extra configuration file applied above the discovered ones.
    #[must_use]
    pub fn with_file(mut self, path: &Path) -> Self {
        self.explicit_file = Some(path.to_path_buf());
        self
    }

    /// Ignore user and project configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `PATHHIST_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut sources: Vec<ConfigSource> = Vec::new();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            sources.extend(ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?);
        }

        if let Some(path) = self.explicit_file {
            let config = ConfigLoader::load_file(&path)?;
            sources.push(ConfigSource {
                path,
                precedence: 4,
                config,
            });
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, &overrides);
        }

        ConfigValidator::validate(&config)?;
        log::debug!(
            "configuration: table `{}`, {} prefix(es)",
            config.table(),
            config.prefixes.as_ref().map_or(0, Vec::len)
        );

        Ok(config)
    }
}
