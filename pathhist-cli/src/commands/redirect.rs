//! Redirect command implementation.

use crate::error::CliError;
use crate::utils::{open_path_history, GlobalOptions};
use clap::Args;

/// Resolve a request path to its redirect.
///
/// Prints `<status> <target>`; exits with status 1 when the path is
/// live or unknown.
#[derive(Args)]
pub struct RedirectCommand {
    /// Request path, with or without a leading slash
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Print the redirect as JSON
    #[arg(long)]
    pub json: bool,
}

impl RedirectCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let paths = open_path_history(global)?;

        let Some(redirect) = paths.check_redirect(&self.path)? else {
            return Err(CliError::SemanticFailure(format!(
                "No redirect for {}",
                self.path
            )));
        };

        if self.json {
            let json = serde_json::to_string(&redirect)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            println!("{json}");
        } else {
            println!("{} {}", redirect.status, redirect.target);
        }
        Ok(())
    }
}
