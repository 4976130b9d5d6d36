//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Settings - Inspect and edit a KEY=VALUE settings file
#[derive(Parser, Debug)]
#[command(name = "settings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file to operate on [default: ~/.settings.cfg]
    #[arg(short, long, global = true, env = "SETTINGS_FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value stored for a key
    Get {
        /// Key to look up
        key: String,

        /// Value to print when the key is not set
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Add or update entries
    ///
    /// Examples:
    ///   settings set WEB_SERVER_PORT=8080
    ///   settings set SERVER_IP=127.0.0.1 URL_VALUE=sqlite:///tvb.db
    Set {
        /// Entries in KEY=VALUE form
        #[arg(required = true, value_name = "KEY=VALUE")]
        entries: Vec<String>,
    },

    /// Remove entries
    Unset {
        /// Keys to remove; keys that are not set are ignored
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// List all entries in file order
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the settings file location and state
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List well-known keys and their current values
    Keys,

    /// Replace the settings file with the entries of another file
    Import {
        /// Settings file to copy entries from
        source: PathBuf,
    },
}
