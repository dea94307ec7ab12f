//! Output formatter implementations.

use crate::record::PathRecord;
use crate::{Error, Result};

use super::OutputFormatter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_created(record: &PathRecord) -> String {
    record
        .created_at_utc()
        .map_or_else(|| "-".to_string(), |t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, records: &[PathRecord]) -> Result<String> {
        serde_json::to_string_pretty(records).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for human-readable, column-aligned output.
pub struct TableFormatter;

impl OutputFormatter for TableFormatter {
    fn format(&self, records: &[PathRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok("No path records.".to_string());
        }

        let link_width = records
            .iter()
            .map(|r| r.link.len())
            .max()
            .unwrap_or(0)
            .max("LINK".len());
        let id_width = records
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(0)
            .max("ID".len());

        let mut lines = vec![format!(
            "{:>id_width$}  {:<link_width$}  CURRENT  CREATED",
            "ID", "LINK"
        )];
        for record in records {
            lines.push(format!(
                "{:>id_width$}  {:<link_width$}  {:<7}  {}",
                record.id,
                record.link,
                if record.is_current { "*" } else { "" },
                format_created(record)
            ));
        }

        Ok(lines.join("\n"))
    }
}
