//! Current command implementation.

use crate::commands::OwnerArgs;
use crate::error::CliError;
use crate::utils::{format_timestamp, open_path_history, GlobalOptions};
use clap::Args;

/// Print an owner's current path.
///
/// Exits with status 1 when the owner has no current record.
#[derive(Args)]
pub struct CurrentCommand {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Also print the record id and creation time
    #[arg(long)]
    pub details: bool,
}

impl CurrentCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let paths = open_path_history(global)?;
        let owner = self.owner.related_ref();

        let Some(record) = paths.current_path_record(&owner)? else {
            return Err(CliError::SemanticFailure(format!(
                "No current path for {owner}"
            )));
        };

        if self.details {
            println!(
                "{}\t{}\t{}",
                record.id,
                record.link,
                format_timestamp(record.created_at)
            );
        } else {
            println!("{}", record.link);
        }
        Ok(())
    }
}
