//! Environment variable handling for configuration overrides.
//!
//! `PATHHIST_*` variables override values from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Overrides the record table name.
pub const TABLE_ENV: &str = "PATHHIST_TABLE";
/// Overrides the redirect status.
pub const REDIRECT_STATUS_ENV: &str = "PATHHIST_REDIRECT_STATUS";
/// Overrides the soft-deleted cascade policy.
pub const CASCADE_SOFT_DELETED_ENV: &str = "PATHHIST_CASCADE_SOFT_DELETED";
/// Overrides the lock wait.
pub const MAXIMUM_LOCK_WAIT_SECONDS_ENV: &str = "PATHHIST_MAXIMUM_LOCK_WAIT_SECONDS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathhist::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong type.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(table) = env::var(TABLE_ENV) {
            config.table = Some(table);
        }

        if let Ok(status) = env::var(REDIRECT_STATUS_ENV) {
            config.redirect_status = Some(status.trim().parse().map_err(|_| Error::Validation {
                field: REDIRECT_STATUS_ENV.into(),
                message: format!("Invalid HTTP status: '{status}'"),
            })?);
        }

        if let Ok(val) = env::var(CASCADE_SOFT_DELETED_ENV) {
            config.cascade_soft_deleted = Some(Self::parse_bool(CASCADE_SOFT_DELETED_ENV, &val)?);
        }

        if let Ok(seconds) = env::var(MAXIMUM_LOCK_WAIT_SECONDS_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: MAXIMUM_LOCK_WAIT_SECONDS_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
