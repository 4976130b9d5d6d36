//! get, set and unset

use std::path::Path;

use colored::Colorize;
use settings_store::ConfigStore;

use crate::error::{CliError, Result};

/// Print the value of `key`, or `default` when it is not set
pub fn run_get(file: &Path, key: &str, default: Option<&str>) -> Result<()> {
    let store = ConfigStore::open(file)?;

    match store.get(key).or(default) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(CliError::user(format!(
            "'{}' is not set in {}",
            key,
            file.display()
        ))),
    }
}

/// Add or update `KEY=VALUE` entries
pub fn run_set(file: &Path, entries: &[String]) -> Result<()> {
    let updates = entries
        .iter()
        .map(String::as_str)
        .map(parse_assignment)
        .collect::<Result<Vec<_>>>()?;

    let mut store = ConfigStore::open(file)?;
    store.add_entries(updates.iter().copied())?;

    for (key, _) in &updates {
        let stored = store.get(key).unwrap_or_default();
        println!("{} {}={}", "+".green(), key, stored);
    }
    Ok(())
}

/// Remove keys; keys that are not set are reported but not an error
pub fn run_unset(file: &Path, keys: &[String]) -> Result<()> {
    let mut store = ConfigStore::open(file)?;
    let present: Vec<&String> = keys.iter().filter(|k| store.contains(k)).collect();

    store.delete_entries(keys)?;

    for key in keys {
        if present.contains(&key) {
            println!("{} {}", "-".red(), key);
        } else {
            println!("{} {} {}", "~".dimmed(), key, "(not set)".dimmed());
        }
    }
    Ok(())
}

/// Split a `KEY=VALUE` argument on its first `=`
fn parse_assignment(entry: &str) -> Result<(&str, &str)> {
    entry.split_once('=').ok_or_else(|| {
        CliError::user(format!("expected KEY=VALUE, got '{entry}'"))
    })
}
