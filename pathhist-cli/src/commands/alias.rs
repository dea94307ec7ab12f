//! Alias command implementation.

use crate::error::CliError;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;
use pathhist::record::strip_leading_slash;

/// Add an alias: an extra link that redirects to a record's owner.
#[derive(Args)]
pub struct AliasCommand {
    /// The alias link
    #[arg(value_name = "LINK")]
    pub link: String,

    /// Id of the record the alias points at
    #[arg(long, value_name = "RECORD_ID")]
    pub to: i64,
}

impl AliasCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let link = strip_leading_slash(&self.link);
        if link.is_empty() {
            return Err(CliError::InvalidArguments("link must not be empty".into()));
        }

        let mut paths = open_path_history(global)?;
        let alias = paths.add_alias(self.to, link)?;

        println!("{}", alias.id);
        Ok(())
    }
}
