//! Settings CLI
//!
//! Command-line front end over a single settings file.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

/// Settings file used when neither `--file` nor `SETTINGS_FILE` is given
const DEFAULT_FILE_NAME: &str = ".settings.cfg";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }

    let Some(command) = cli.command else {
        println!("{} Settings CLI", "settings".green().bold());
        println!();
        println!("Run {} for available commands.", "settings --help".cyan());
        return Ok(());
    };

    let file = resolve_settings_file(cli.file)?;
    tracing::debug!(file = %file.display(), "Using settings file");
    execute_command(&file, command)
}

fn resolve_settings_file(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => dirs::home_dir()
            .map(|home| home.join(DEFAULT_FILE_NAME))
            .ok_or_else(|| {
                CliError::user("could not determine home directory; pass --file or set SETTINGS_FILE")
            }),
    }
}

fn execute_command(file: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Get { key, default } => commands::run_get(file, &key, default.as_deref()),
        Commands::Set { entries } => commands::run_set(file, &entries),
        Commands::Unset { keys } => commands::run_unset(file, &keys),
        Commands::List { json } => commands::run_list(file, json),
        Commands::Status { json } => commands::run_status(file, json),
        Commands::Keys => commands::run_keys(file),
        Commands::Import { source } => commands::run_import(file, &source),
    }
}
