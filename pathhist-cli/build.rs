//! Build script for pathhist-cli.
//!
//! Generates the `pathhist.1` man page into `OUT_DIR` using clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! outline is repeated here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Command outline for the man page.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("pathhist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and administer path history")
        .long_about(
            "Command-line tool for versioned URL paths: record histories, aliases, \
             redirects and prefix resolution",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PATHHIST_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("PATHHIST_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("PATHHIST_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init").about("Initialize the data directory and database"),
            Command::new("track").about("Record a new current path for an owner"),
            Command::new("alias").about("Add an alias redirecting to a record"),
            Command::new("history").about("List an owner's path records"),
            Command::new("current").about("Print an owner's current path"),
            Command::new("delete").about("Delete one path record"),
            Command::new("forget").about("Delete every path record of an owner"),
            Command::new("restore").about("Make an owner's newest record current again"),
            Command::new("redirect").about("Resolve a request path to its redirect"),
            Command::new("resolve").about("Resolve a request path to a prefix handler"),
            Command::new("validate").about("Validate configuration and print the prefix table"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("pathhist.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
