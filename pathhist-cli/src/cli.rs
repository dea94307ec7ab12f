//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AliasCommand, CompletionsCommand, CurrentCommand, DeleteCommand, ForgetCommand,
    HistoryCommand, InitCommand, RedirectCommand, ResolveCommand, RestoreCommand, TrackCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting and administering path history.
#[derive(Parser)]
#[command(name = "pathhist")]
#[command(version, about = "Inspect and administer path history", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PATHHIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PATHHIST_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Additional configuration file, applied above discovered files
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "PATHHIST_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Record a new current path for an owner
    Track(TrackCommand),

    /// Add an alias redirecting to a record
    Alias(AliasCommand),

    /// List an owner's path records, newest first
    History(HistoryCommand),

    /// Print an owner's current path
    Current(CurrentCommand),

    /// Delete one path record
    Delete(DeleteCommand),

    /// Delete every path record of an owner
    Forget(ForgetCommand),

    /// Make an owner's newest record current again
    Restore(RestoreCommand),

    /// Resolve a request path to its redirect
    Redirect(RedirectCommand),

    /// Resolve a request path to a prefix handler
    Resolve(ResolveCommand),

    /// Validate configuration and print the prefix table
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
