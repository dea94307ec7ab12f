//! Track command implementation.

use crate::commands::OwnerArgs;
use crate::error::CliError;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;
use pathhist::history;
use pathhist::record::strip_leading_slash;
use pathhist::slug::make_slug;

/// Record a new current path for an owner.
///
/// The owner's previous current record stays in its history and starts
/// redirecting to the new link.
#[derive(Args)]
pub struct TrackCommand {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// The new link, without scheme
    #[arg(value_name = "LINK")]
    pub link: String,

    /// Turn each segment of LINK into a slug (`New Boots` becomes `new-boots`)
    #[arg(long)]
    pub slugify: bool,
}

/// Slugifies every `/`-separated segment of `link`, dropping empty ones.
fn slugify_link(link: &str) -> String {
    link.split('/')
        .map(make_slug)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl TrackCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let link = if self.slugify {
            slugify_link(&self.link)
        } else {
            strip_leading_slash(&self.link).to_string()
        };
        if link.is_empty() {
            return Err(CliError::InvalidArguments("link must not be empty".into()));
        }

        let mut paths = open_path_history(global)?;
        let owner = self.owner.related_ref();
        let record = paths
            .database_mut()
            .write(|store| history::insert_current(store, &link, &owner))?;

        println!("{}", record.id);
        Ok(())
    }
}
