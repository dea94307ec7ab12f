//! Restore command implementation.

use crate::commands::OwnerArgs;
use crate::error::CliError;
use crate::stored::StoredOwner;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;

/// Make an owner's newest record current again.
///
/// Used after an owner comes back from a soft delete. Prints the restored
/// link.
#[derive(Args)]
pub struct RestoreCommand {
    #[command(flatten)]
    pub owner: OwnerArgs,
}

impl RestoreCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut paths = open_path_history(global)?;
        let owner = StoredOwner::new(self.owner.related_type.as_str(), self.owner.related_id);

        match paths.on_restore(&owner)? {
            Some(record) => {
                println!("{}", record.link);
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!(
                "No path records for {}",
                self.owner.related_ref()
            ))),
        }
    }
}
