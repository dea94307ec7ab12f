//! Error types for the pathhist library.
//!
//! This module provides the error hierarchy for all operations in the
//! pathhist library, using `thiserror` for ergonomic error handling.
//!
//! Resolution misses (no matching record, no handler) are not errors: the
//! resolvers report them as `None`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathhist error.
///
/// # Examples
///
/// ```
/// use pathhist::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("shop/boots".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathhist library.
#[derive(Debug, Error)]
pub enum Error {
    /// Required wiring is missing or malformed.
    ///
    /// Raised for an undeclared parent relation where one is required, a
    /// parent relation of the wrong shape, a parent type that is not
    /// path-trackable, an unregistered handler, or an incomplete prefix table.
    #[error("configuration error: {details}")]
    Configuration {
        /// Description of the misconfiguration.
        details: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An addressed resource does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Builds a [`Error::Configuration`] from anything displayable.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathhist::Error;
    ///
    /// let err = Error::configuration("handler `shop` is not registered");
    /// assert!(err.is_configuration());
    /// ```
    pub fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration {
            details: details.into(),
        }
    }

    /// Check if error reports broken wiring.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if error reports a missing addressed resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
