//! list, status and keys

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use settings_store::{ConfigStore, SettingKey};

use crate::error::Result;

/// Summary printed by `settings status`
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    path: &'a Path,
    exists: bool,
    entries: usize,
    first_run: bool,
}

/// Print all entries in file order
pub fn run_list(file: &Path, json: bool) -> Result<()> {
    let store = ConfigStore::open(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.settings())?);
        return Ok(());
    }

    if store.settings().is_empty() {
        println!("{}", "(no settings)".dimmed());
        return Ok(());
    }

    for (key, value) in store.settings() {
        println!("{}={}", key.bold(), value);
    }
    Ok(())
}

/// Print where the settings live and whether they look freshly created
pub fn run_status(file: &Path, json: bool) -> Result<()> {
    let store = ConfigStore::open(file)?;
    let report = StatusReport {
        path: store.path(),
        exists: store.path().exists(),
        entries: store.settings().len(),
        first_run: store.is_first_run(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Settings Status".bold());
    println!();
    println!("  {:<12} {}", "File:".dimmed(), report.path.display());
    let exists = if report.exists {
        "yes".green()
    } else {
        "no".yellow()
    };
    println!("  {:<12} {}", "Exists:".dimmed(), exists);
    println!("  {:<12} {}", "Entries:".dimmed(), report.entries);
    let first_run = if report.first_run {
        "yes".yellow()
    } else {
        "no".green()
    };
    println!("  {:<12} {}", "First run:".dimmed(), first_run);
    Ok(())
}

/// Print every well-known key with its current value
pub fn run_keys(file: &Path) -> Result<()> {
    let store = ConfigStore::open(file)?;

    for key in SettingKey::ALL {
        match store.get(key) {
            Some(value) => println!("  {} {}={}", "+".green(), key, value),
            None => println!("  {} {} {}", " ".dimmed(), key, "(unset)".dimmed()),
        }
    }
    Ok(())
}
