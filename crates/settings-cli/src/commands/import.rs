//! import

use std::path::Path;

use colored::Colorize;
use settings_store::ConfigStore;

use crate::error::{CliError, Result};

/// Replace the settings file with the entries parsed from `source`
pub fn run_import(file: &Path, source: &Path) -> Result<()> {
    if !source.is_file() {
        return Err(CliError::user(format!(
            "source file not found: {}",
            source.display()
        )));
    }

    let imported = ConfigStore::open(source)?;
    let mut store = ConfigStore::open(file)?;
    let previous = store.settings().len();

    store.overwrite(imported.settings())?;

    println!(
        "{} Imported {} entries from {} ({} replaced)",
        "OK".green().bold(),
        store.settings().len(),
        source.display(),
        previous
    );
    Ok(())
}
