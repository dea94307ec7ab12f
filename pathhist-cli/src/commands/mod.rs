//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory and database
//! - `track`: Record a new current path for an owner
//! - `alias`: Add an alias redirecting to a record
//! - `history`: List an owner's records
//! - `current`: Print an owner's current path
//! - `delete`: Delete one record, promoting the next
//! - `forget`: Delete every record of an owner
//! - `restore`: Re-promote an owner's newest record
//! - `redirect`: Resolve a request path to its redirect
//! - `resolve`: Resolve a request path to a prefix handler
//! - `validate`: Validate configuration
//! - `completions`: Generate shell completion scripts

pub mod alias;
pub mod completions;
pub mod current;
pub mod delete;
pub mod forget;
pub mod history;
pub mod init;
pub mod redirect;
pub mod resolve;
pub mod restore;
pub mod track;
pub mod validate;

pub use alias::AliasCommand;
pub use completions::CompletionsCommand;
pub use current::CurrentCommand;
pub use delete::DeleteCommand;
pub use forget::ForgetCommand;
pub use history::HistoryCommand;
pub use init::InitCommand;
pub use redirect::RedirectCommand;
pub use resolve::ResolveCommand;
pub use restore::RestoreCommand;
pub use track::TrackCommand;
pub use validate::ValidateCommand;

use clap::Args;
use pathhist::RelatedRef;

/// The `<TYPE> <ID>` pair naming an owner.
#[derive(Args, Debug, Clone)]
pub struct OwnerArgs {
    /// Owner type tag
    #[arg(value_name = "TYPE")]
    pub related_type: String,

    /// Owner id
    #[arg(value_name = "ID")]
    pub related_id: i64,
}

impl OwnerArgs {
    /// The owner as a polymorphic reference.
    pub fn related_ref(&self) -> RelatedRef {
        RelatedRef::new(self.related_type.as_str(), self.related_id)
    }
}
