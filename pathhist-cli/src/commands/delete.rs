//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;

/// Delete one path record.
///
/// Aliases of the record go with it. When the owner is left without a
/// current record, its most recent remaining record is promoted.
#[derive(Args)]
pub struct DeleteCommand {
    /// Id of the record to delete
    #[arg(value_name = "RECORD_ID")]
    pub record_id: i64,
}

impl DeleteCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut paths = open_path_history(global)?;
        let promoted = paths.delete_record(self.record_id)?;

        if !global.quiet {
            match promoted {
                Some(record) => println!(
                    "Deleted record {}; promoted record {} ({})",
                    self.record_id, record.id, record.link
                ),
                None => println!("Deleted record {}", self.record_id),
            }
        }
        Ok(())
    }
}
