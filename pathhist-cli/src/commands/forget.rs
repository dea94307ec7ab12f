//! Forget command implementation.

use crate::commands::OwnerArgs;
use crate::error::CliError;
use crate::stored::StoredOwner;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;
use pathhist::DeleteMode;

/// Delete every path record of an owner, with their aliases.
#[derive(Args)]
pub struct ForgetCommand {
    #[command(flatten)]
    pub owner: OwnerArgs,
}

impl ForgetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut paths = open_path_history(global)?;
        let owner = StoredOwner::new(self.owner.related_type.as_str(), self.owner.related_id);
        let deleted = paths.on_delete(&owner, DeleteMode::Hard)?;

        if !global.quiet {
            println!("Deleted {deleted} record(s)");
        }
        Ok(())
    }
}
