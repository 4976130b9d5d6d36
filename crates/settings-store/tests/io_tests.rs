//! Tests for atomic writes and the sidecar lock

use settings_store::io::{self, FileLock};
use settings_store::{ConfigStore, Error, RobustnessConfig};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn fast_config() -> RobustnessConfig {
    RobustnessConfig {
        lock_timeout: Duration::from_millis(200),
        enable_fsync: false,
    }
}

#[test]
fn test_write_atomic_creates_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("settings.cfg");

    io::write_atomic(&path, b"A=1\n", RobustnessConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("settings.cfg");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated", fast_config()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_cleans_up_temp_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("settings.cfg");

    io::write_atomic(&path, b"A=1\n", fast_config()).unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_read_text_if_exists() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("settings.cfg");

    assert_eq!(io::read_text_if_exists(&path).unwrap(), None);

    fs::write(&path, "A=1\n").unwrap();
    assert_eq!(
        io::read_text_if_exists(&path).unwrap().as_deref(),
        Some("A=1\n")
    );
}

#[test]
fn test_held_lock_blocks_writes() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("settings.cfg");
    fs::write(&path, "A=1\n").unwrap();

    let held = FileLock::acquire(&path, Duration::from_millis(100)).unwrap();
    assert!(held.path().ends_with("settings.cfg.lock"));

    let mut store = ConfigStore::open_with_robustness(&path, fast_config()).unwrap();
    let result = store.add_entries([("B", "2")]);

    drop(held);

    assert!(
        matches!(result, Err(Error::LockFailed { .. })),
        "write should fail while the lock is held, got {result:?}"
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\n");

    store.add_entries([("B", "2")]).unwrap();
    assert_eq!(store.get("B"), Some("2"));
}

#[test]
fn test_concurrent_add_entries_lose_no_updates() {
    let temp = tempdir().unwrap();
    let path = Arc::new(temp.path().join("settings.cfg"));

    let num_threads = 8;
    let writes_per_thread = 5;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                let robustness = RobustnessConfig {
                    lock_timeout: Duration::from_secs(30),
                    enable_fsync: false,
                };
                let mut store =
                    ConfigStore::open_with_robustness(path.as_path(), robustness).unwrap();
                barrier.wait();

                for i in 0..writes_per_thread {
                    store
                        .add_entries([(format!("T{thread_id}_{i}"), i)])
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }

    // The lock serializes read-modify-write, so every key survives
    let store = ConfigStore::open(path.as_path()).unwrap();
    assert_eq!(store.settings().len(), num_threads * writes_per_thread);
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn test_failed_write_preserves_original() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let temp = tempdir().unwrap();
        let parent = temp.path().join("parent");
        fs::create_dir(&parent).unwrap();
        let path = parent.join("settings.cfg");
        fs::write(&path, "A=1\n").unwrap();
        // The lock file must exist before the directory turns read-only
        drop(FileLock::acquire(&path, Duration::from_millis(100)).unwrap());

        let mut store = ConfigStore::open_with_robustness(&path, fast_config()).unwrap();
        fs::set_permissions(&parent, Permissions::from_mode(0o555)).unwrap();

        let result = store.add_entries([("B", "2")]);

        let _ = fs::set_permissions(&parent, Permissions::from_mode(0o755));

        assert!(matches!(result, Err(Error::Io { .. })), "got {result:?}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\n");
        assert_eq!(store.get("B"), None);
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.cfg");
        fs::write(&path, "A=1\n").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o000)).unwrap();

        let result = ConfigStore::open(&path);

        let _ = fs::set_permissions(&path, Permissions::from_mode(0o644));

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_write_through_symlink_keeps_link() {
        let temp = tempdir().unwrap();
        let real = temp.path().join("real.cfg");
        let link = temp.path().join("settings.cfg");
        fs::write(&real, "A=1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut store = ConfigStore::open_with_robustness(&link, fast_config()).unwrap();
        store.add_entries([("B", "2")]).unwrap();

        assert_eq!(fs::read_to_string(&real).unwrap(), "A=1\nB=2\n");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(store.get("B"), Some("2"));
    }

    #[test]
    fn test_write_through_dangling_symlink_creates_target() {
        let temp = tempdir().unwrap();
        let real = temp.path().join("real.cfg");
        let link = temp.path().join("settings.cfg");
        std::os::unix::fs::symlink("real.cfg", &link).unwrap();

        let mut store = ConfigStore::open_with_robustness(&link, fast_config()).unwrap();
        store.add_entries([("A", "1")]).unwrap();

        assert_eq!(fs::read_to_string(&real).unwrap(), "A=1\n");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_write_keeps_file_mode() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.cfg");
        fs::write(&path, "SECRET=1\n").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o600)).unwrap();

        let mut store = ConfigStore::open_with_robustness(&path, fast_config()).unwrap();
        store.add_entries([("B", "2")]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "SECRET=1\nB=2\n");
    }
}
