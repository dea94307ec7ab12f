//! Resolve command implementation.
//!
//! Matches a request path against the configured prefix table and reports
//! which handler would serve it.

use crate::error::CliError;
use crate::stored::describing_handlers;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;
use serde::Serialize;

/// Resolve a request path to a prefix handler.
///
/// Prints `<prefix> <handler> <type> <id>`; exits with status 1 when
/// nothing matches.
#[derive(Args)]
pub struct ResolveCommand {
    /// Request path, with or without a leading slash
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Print the match as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Resolution<'a> {
    prefix: &'a str,
    handler: &'a str,
    related_type: &'a str,
    related_id: i64,
    record_id: i64,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let paths = open_path_history(global)?;
        let not_found = || CliError::SemanticFailure(format!("Not found: {}", self.path));

        let target = paths.resolve(&self.path)?.ok_or_else(not_found)?;
        let handlers = describing_handlers(paths.prefixes());
        let description = handlers
            .dispatch(&target.handler, target.entity.as_ref())
            .ok_or_else(not_found)?;

        if self.json {
            let resolution = Resolution {
                prefix: &target.prefix,
                handler: &target.handler,
                related_type: &target.record.related_type,
                related_id: target.record.related_id,
                record_id: target.record.id,
            };
            let json = serde_json::to_string(&resolution)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            println!("{json}");
        } else {
            println!("{} {description}", target.prefix);
        }
        Ok(())
    }
}
