//! Configuration schema definitions.
//!
//! This module defines the configuration structure for pathhist: the record
//! table, redirect behavior, the ordered prefix table and cascade policy.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_TABLE;
use crate::error::Result;
use crate::generator::CascadePolicy;

use super::prefix::PrefixTable;

/// Redirect status used when none is configured.
pub const DEFAULT_REDIRECT_STATUS: u16 = 302;

/// Lock wait used when none is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that configuration files can be layered;
/// the accessor methods supply defaults.
///
/// # Examples
///
/// ```
/// use pathhist::config::Config;
///
/// let config: Config = serde_yaml::from_str(
///     "redirect_status: 301\n\
///      prefixes:\n\
///      \x20 - prefix: shop\n\
///      \x20   types: [product, product_category]\n\
///      \x20   handler: shop\n",
/// )
/// .unwrap();
/// assert_eq!(config.redirect_status(), 301);
/// assert_eq!(config.table(), "path_history");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the path record table.
    pub table: Option<String>,

    /// HTTP status attached to redirects.
    pub redirect_status: Option<u16>,

    /// Ordered prefix table entries.
    pub prefixes: Option<Vec<PrefixConfig>>,

    /// Whether soft-deleted descendants are regenerated in a cascade.
    pub cascade_soft_deleted: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

impl Config {
    /// Record table name, defaulting to `path_history`.
    #[must_use]
    pub fn table(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    /// Redirect status, defaulting to 302.
    #[must_use]
    pub fn redirect_status(&self) -> u16 {
        self.redirect_status.unwrap_or(DEFAULT_REDIRECT_STATUS)
    }

    /// Cascade policy for soft-deleted descendants, defaulting to include.
    #[must_use]
    pub fn cascade_policy(&self) -> CascadePolicy {
        if self.cascade_soft_deleted.unwrap_or(true) {
            CascadePolicy::IncludeSoftDeleted
        } else {
            CascadePolicy::SkipSoftDeleted
        }
    }

    /// Busy timeout for the database connection.
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Normalized prefix table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a list-form entry without a handler
    /// or a repeated prefix.
    pub fn prefix_table(&self) -> Result<PrefixTable> {
        PrefixTable::from_config(self.prefixes.as_deref().unwrap_or_default())
    }
}

/// One entry of the prefix table as written in configuration.
///
/// # Examples
///
/// ```
/// use pathhist::config::{PrefixConfig, TypeHandlers};
///
/// let entry: PrefixConfig = serde_yaml::from_str(
///     "prefix: another\ntypes:\n  product_category: another\n",
/// )
/// .unwrap();
/// assert!(matches!(entry.types, TypeHandlers::Map(_)));
/// assert!(entry.handler.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PrefixConfig {
    /// Leading path segment(s), without surrounding slashes.
    pub prefix: String,

    /// Types served under the prefix.
    pub types: TypeHandlers,

    /// Handler for every type of a list-form `types`.
    #[serde(default, alias = "controller", skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

/// The two accepted shapes of `types`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TypeHandlers {
    /// Type tags sharing the entry's `handler`.
    List(Vec<String>),
    /// Type tag to handler name.
    Map(BTreeMap<String, String>),
}

impl TypeHandlers {
    /// The type tags, in declaration order for lists and sorted for maps.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        match self {
            Self::List(types) => types.iter().map(String::as_str).collect(),
            Self::Map(map) => map.keys().map(String::as_str).collect(),
        }
    }
}

/// Output format for record listings.
///
/// # Examples
///
/// ```
/// use pathhist::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}
