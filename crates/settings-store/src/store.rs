//! Read/write access to a single settings file

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::format::{self, MalformedLine};
use crate::io::{self, FileLock, RobustnessConfig};
use crate::set::ConfigSet;
use crate::value::FromSetting;
use crate::{Error, Result};

/// A settings file holding at most this many entries counts as a first run.
pub const FIRST_RUN_MAX_ENTRIES: usize = 2;

/// Owner of one `KEY=VALUE` settings file.
///
/// The file is parsed once at [`open`](Self::open) and the result cached.
/// Every mutation re-reads the file, applies the change, writes it back and
/// refreshes the cache from disk, so the cache always matches what parsing
/// the file would produce.
///
/// Typed lookups are fail-soft: a missing key or a value that does not
/// convert yields the caller's default. A malformed file, on the other
/// hand, is an error at open and on every reload.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    robustness: RobustnessConfig,
    settings: ConfigSet,
}

impl ConfigStore {
    /// Open the settings file at `path` with default robustness settings.
    ///
    /// A missing file yields an empty store; nothing is created until the
    /// first write.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if a non-comment line lacks `=`, [`Error::Io`] if
    /// the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_robustness(path, RobustnessConfig::default())
    }

    /// Open the settings file at `path` with custom robustness settings.
    pub fn open_with_robustness(
        path: impl Into<PathBuf>,
        robustness: RobustnessConfig,
    ) -> Result<Self> {
        let path = path.into();
        let settings = read_settings(&path)?;
        tracing::debug!(path = %path.display(), entries = settings.len(), "Opened settings file");
        Ok(Self {
            path,
            robustness,
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached settings as of the last open or write.
    pub fn settings(&self) -> &ConfigSet {
        &self.settings
    }

    /// Parse the file again without touching the cache.
    pub fn load(&self) -> Result<ConfigSet> {
        read_settings(&self.path)
    }

    /// Merge `updates` into the stored settings.
    ///
    /// Keys in `updates` take the new value, other keys keep theirs.
    /// Values are stored in their `Display` form.
    pub fn add_entries<I, K, V>(&mut self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        let _lock = self.lock()?;
        let mut merged = self.load()?;
        for (key, value) in updates {
            merged.insert(key, value.to_string());
        }
        self.persist(&merged)
    }

    /// Remove `keys` from the stored settings. Absent keys are ignored.
    pub fn delete_entries<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let _lock = self.lock()?;
        let mut remaining = self.load()?;
        for key in keys {
            remaining.remove(key.as_ref());
        }
        self.persist(&remaining)
    }

    /// Replace the whole file with exactly `entries`.
    pub fn overwrite<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        let replacement: ConfigSet = entries
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();

        let _lock = self.lock()?;
        self.persist(&replacement)
    }

    /// Get the cached string for `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.settings.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.settings.contains_key(key.as_ref())
    }

    /// Get `key` converted to `T`, or `default` if it is missing or does not
    /// convert.
    pub fn get_attribute<T: FromSetting>(&self, key: impl AsRef<str>, default: T) -> T {
        let key = key.as_ref();
        let Some(raw) = self.settings.get(key) else {
            return default;
        };

        match T::from_setting(raw) {
            Some(value) => value,
            None => {
                tracing::warn!(
                    key,
                    value = raw,
                    target_type = std::any::type_name::<T>(),
                    "Setting does not convert, using default"
                );
                default
            }
        }
    }

    /// Whether the file looks freshly created.
    ///
    /// A new installation only writes a couple of bootstrap keys, so a
    /// store with at most [`FIRST_RUN_MAX_ENTRIES`] entries counts.
    pub fn is_first_run(&self) -> bool {
        self.settings.len() <= FIRST_RUN_MAX_ENTRIES
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(&self.path, self.robustness.lock_timeout)
    }

    /// Write `settings` and refresh the cache from disk. Caller holds the lock.
    fn persist(&mut self, settings: &ConfigSet) -> Result<()> {
        for (key, value) in settings {
            format::validate_entry(key, value)?;
        }

        let content = format::serialize(settings);
        io::replace_file(&self.path, content.as_bytes(), self.robustness.enable_fsync)?;
        tracing::debug!(path = %self.path.display(), entries = settings.len(), "Wrote settings file");

        self.settings = self.load()?;
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<ConfigSet> {
    let Some(content) = io::read_text_if_exists(path)? else {
        return Ok(ConfigSet::new());
    };

    format::parse(&content).map_err(|MalformedLine { line, content }| Error::Format {
        path: path.to_path_buf(),
        line,
        content,
    })
}
