//! Configuration validation.
//!
//! Wiring problems (bad table name, bad redirect status, malformed prefix
//! table) are reported as [`Error::Configuration`]; plain value problems as
//! [`Error::Validation`].

use std::collections::HashSet;

use crate::config::schema::{Config, PrefixConfig, TypeHandlers};
use crate::database::validate_table_name;
use crate::error::{Error, Result};

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use pathhist::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { redirect_status: Some(200), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref table) = config.table {
            validate_table_name(table)?;
        }

        if let Some(status) = config.redirect_status {
            Self::validate_redirect_status(status)?;
        }

        if let Some(ref prefixes) = config.prefixes {
            Self::validate_prefixes(prefixes)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }

    /// Redirect statuses must be 3xx redirection codes.
    fn validate_redirect_status(status: u16) -> Result<()> {
        if (300..=308).contains(&status) {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "redirect_status {status} is not a redirection status (300-308)"
            )))
        }
    }

    fn validate_prefixes(prefixes: &[PrefixConfig]) -> Result<()> {
        let mut seen = HashSet::new();

        for (i, entry) in prefixes.iter().enumerate() {
            let prefix = entry.prefix.as_str();

            if prefix.trim().is_empty() {
                return Err(Error::configuration(format!("prefixes[{i}]: prefix is empty")));
            }
            if prefix.starts_with('/') || prefix.ends_with('/') {
                return Err(Error::configuration(format!(
                    "prefixes[{i}]: prefix `{prefix}` must not start or end with `/`"
                )));
            }
            if prefix.split('/').any(str::is_empty) {
                return Err(Error::configuration(format!(
                    "prefixes[{i}]: prefix `{prefix}` contains an empty segment"
                )));
            }
            if !seen.insert(prefix) {
                return Err(Error::configuration(format!(
                    "prefixes[{i}]: prefix `{prefix}` is configured more than once"
                )));
            }

            match &entry.types {
                TypeHandlers::List(types) => {
                    if types.is_empty() {
                        return Err(Error::configuration(format!(
                            "prefixes[{i}]: `types` is empty"
                        )));
                    }
                    match entry.handler.as_deref() {
                        None => {
                            return Err(Error::configuration(format!(
                                "prefixes[{i}]: `handler` must be present when types are given as a list"
                            )))
                        }
                        Some(h) if h.trim().is_empty() => {
                            return Err(Error::configuration(format!(
                                "prefixes[{i}]: `handler` is empty"
                            )))
                        }
                        Some(_) => {}
                    }
                }
                TypeHandlers::Map(map) => {
                    if map.is_empty() {
                        return Err(Error::configuration(format!(
                            "prefixes[{i}]: `types` is empty"
                        )));
                    }
                    if let Some((tag, _)) = map.iter().find(|(_, h)| h.trim().is_empty()) {
                        return Err(Error::configuration(format!(
                            "prefixes[{i}]: type `{tag}` has an empty handler"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
