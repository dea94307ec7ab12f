//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathhist::config::{Config, ConfigMerger};
///
/// let low = Config { redirect_status: Some(302), ..Default::default() };
/// let high = Config { redirect_status: Some(301), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.redirect_status, Some(301));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Scalar fields: source overwrites if Some
    /// - Prefix table: complete replacement, since entry order is meaningful
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.table.is_some() {
            target.table.clone_from(&source.table);
        }

        if source.redirect_status.is_some() {
            target.redirect_status = source.redirect_status;
        }

        if source.cascade_soft_deleted.is_some() {
            target.cascade_soft_deleted = source.cascade_soft_deleted;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.prefixes.is_some() {
            target.prefixes.clone_from(&source.prefixes);
        }
    }
}
