//! Atomic settings-file I/O with advisory locking

use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, Result};

/// Locking and durability knobs for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying a contended lock before giving up.
    pub lock_timeout: Duration,
    /// Flush the temp file to disk before it replaces the target.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Exclusive advisory lock on `<file>.lock`, released on drop.
///
/// The sidecar file stays in place so that every process locks the same
/// inode; the settings file itself is replaced by rename on each write.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire the lock guarding `target`, retrying until `timeout` elapses.
    pub fn acquire(target: &Path, timeout: Duration) -> Result<Self> {
        let path = lock_path(target);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(10))
            .with_max_interval(Duration::from_millis(250))
            .with_max_elapsed_time(Some(timeout))
            .build();

        let locked = backoff::retry(policy, || {
            FileExt::try_lock_exclusive(&file).map_err(|e| {
                if e.kind() == fs2::lock_contended_error().kind() {
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
        });

        match locked {
            Ok(()) => {
                tracing::trace!(path = %path.display(), "Acquired settings lock");
                Ok(Self { file, path })
            }
            Err(backoff::Error::Permanent(e)) => Err(Error::io(&path, e)),
            Err(backoff::Error::Transient { .. }) => Err(Error::LockFailed {
                path: target.to_path_buf(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release settings lock");
        }
    }
}

/// Path of the sidecar lock file for `target`.
pub fn lock_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

/// Read a text file, treating a missing file as `None`.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Replace `path` with `content` via write-to-temp-then-rename.
///
/// A symlinked `path` is followed so the link keeps pointing at the
/// updated file, and an existing file keeps its permissions. Callers are
/// expected to hold the [`FileLock`] for `path`.
pub fn replace_file(path: &Path, content: &[u8], enable_fsync: bool) -> Result<()> {
    let target = resolve_target(path)?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(&temp_name);

    let result = write_temp(&temp_path, content, permissions, enable_fsync)
        .and_then(|()| fs::rename(&temp_path, &target).map_err(|e| Error::io(&target, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Follow `path` if it is a symlink, including one whose target is missing.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let link = fs::read_link(path).map_err(|e| Error::io(path, e))?;
                Ok(match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                })
            }
            Err(e) => Err(Error::io(path, e)),
        },
        _ => Ok(path.to_path_buf()),
    }
}

fn write_temp(
    temp_path: &Path,
    content: &[u8],
    permissions: Option<Permissions>,
    enable_fsync: bool,
) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if let Some(permissions) = permissions {
        temp_file
            .set_permissions(permissions)
            .map_err(|e| Error::io(temp_path, e))?;
    }

    if enable_fsync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

/// Lock `path` and replace its content atomically.
pub fn write_atomic(path: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let _lock = FileLock::acquire(path, config.lock_timeout)?;
    replace_file(path, content, config.enable_fsync)
}
