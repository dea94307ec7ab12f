//! History command implementation.
//!
//! Lists an owner's path records, newest first, as a table or JSON.

use crate::commands::OwnerArgs;
use crate::error::CliError;
use crate::utils::{open_path_history, GlobalOptions};
use clap::{Args, ValueEnum};
use pathhist::config::OutputFormat;
use pathhist::output::create_formatter;

/// List an owner's path records.
#[derive(Args)]
pub struct HistoryCommand {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "PATHHIST_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: HistoryFormat,

    /// Only list records that are no longer current
    #[arg(long)]
    pub old: bool,
}

/// Output format for the history command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum HistoryFormat {
    /// Aligned table (human-readable)
    Table,
    /// JSON array of records
    Json,
}

impl From<HistoryFormat> for OutputFormat {
    fn from(format: HistoryFormat) -> Self {
        match format {
            HistoryFormat::Table => OutputFormat::Table,
            HistoryFormat::Json => OutputFormat::Json,
        }
    }
}

impl HistoryCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let paths = open_path_history(global)?;
        let owner = self.owner.related_ref();

        let records = if self.old {
            paths.old_paths(&owner)?
        } else {
            paths.path_history(&owner)?
        };

        let formatter = create_formatter(self.format.into());
        println!("{}", formatter.format(&records)?);
        Ok(())
    }
}
