//! Configuration system for pathhist.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the table name, redirect status and prefix table
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHHIST_*`)
//! 3. An explicit file (via `ConfigBuilder::with_file`)
//! 4. Private project config (`pathhist.local.yaml`)
//! 5. Project config (`pathhist.yaml`)
//! 6. User config (`~/.pathhist/config.yaml`)
//! 7. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use pathhist::config::{Config, ConfigBuilder};
//!
//! let yaml = r"
//! prefixes:
//!   - prefix: shop
//!     types: [product, product_category]
//!     handler: shop
//!   - prefix: another
//!     types:
//!       product_category: another
//! ";
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(serde_yaml::from_str::<Config>(yaml).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let table = config.prefix_table().unwrap();
//! assert_eq!(table.prefix_for_type("product_category"), Some("another"));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod prefix;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use prefix::{PrefixEntry, PrefixTable};
pub use schema::{Config, OutputFormat, PrefixConfig, TypeHandlers, DEFAULT_REDIRECT_STATUS};
pub use validator::ConfigValidator;
