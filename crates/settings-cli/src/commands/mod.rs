//! Command implementations for the settings CLI

mod entries;
mod import;
mod show;

pub use entries::{run_get, run_set, run_unset};
pub use import::run_import;
pub use show::{run_keys, run_list, run_status};
