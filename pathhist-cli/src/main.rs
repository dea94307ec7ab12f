//! Main entry point for the pathhist CLI.
//!
//! This is the command-line interface over a path history store. It
//! provides commands for:
//! - recording and inspecting owner histories (`track`, `history`, `current`)
//! - administering records (`alias`, `delete`, `forget`, `restore`)
//! - answering requests (`redirect`, `resolve`)

mod cli;
mod commands;
mod error;
mod stored;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    pathhist::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        config: cli.config,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Track(cmd) => cmd.execute(&global),
        cli::Command::Alias(cmd) => cmd.execute(&global),
        cli::Command::History(cmd) => cmd.execute(&global),
        cli::Command::Current(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Forget(cmd) => cmd.execute(&global),
        cli::Command::Restore(cmd) => cmd.execute(&global),
        cli::Command::Redirect(cmd) => cmd.execute(&global),
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
