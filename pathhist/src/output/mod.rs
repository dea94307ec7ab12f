//! Output formatting for path records.
//!
//! Record lists are rendered either as an aligned, human-readable table or
//! as JSON.

mod formatters;

use crate::config::OutputFormat;
use crate::record::PathRecord;
use crate::Result;

pub use formatters::{JsonFormatter, TableFormatter};

/// Trait for formatting path records into different output formats.
pub trait OutputFormatter {
    /// Format the given records into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, records: &[PathRecord]) -> Result<String>;
}

/// Create a formatter for `format`.
///
/// # Examples
///
/// ```
/// use pathhist::config::OutputFormat;
/// use pathhist::output::create_formatter;
///
/// let formatter = create_formatter(OutputFormat::Table);
/// assert_eq!(formatter.format(&[]).unwrap(), "No path records.");
/// ```
#[must_use]
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
