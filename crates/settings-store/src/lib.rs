//! Flat-file settings persistence
//!
//! Reads and writes `KEY=VALUE` lines in a single settings file and
//! exposes typed lookups that fall back to a caller-supplied default.

pub mod error;
pub mod format;
pub mod io;
pub mod keys;
pub mod set;
pub mod store;
pub mod value;

pub use error::{Error, Result};
pub use format::MalformedLine;
pub use io::RobustnessConfig;
pub use keys::SettingKey;
pub use set::{ConfigEntry, ConfigSet};
pub use store::{ConfigStore, FIRST_RUN_MAX_ENTRIES};
pub use value::FromSetting;
