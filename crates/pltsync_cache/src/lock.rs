//! Per-PLT mutual exclusion.
//!
//! A [`PltLock`] is held for the whole synchronize + check sequence. Within a
//! process, a second acquirer for the same PLT blocks until the holder drops
//! its guard. Across processes, an exclusive advisory lock on `<plt>.lock`
//! marks ownership; if another process holds it, acquisition fails
//! immediately with [`CacheError::Locked`]. The operating system releases the
//! advisory lock when its holder exits, however it exits, so a lock file left
//! on disk by a dead process never blocks a later run.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, OnceLock, PoisonError};

use fs2::FileExt;
use tracing::debug;

use crate::error::CacheError;

/// Suffix appended to the PLT path to name its lock file.
const LOCK_SUFFIX: &str = ".lock";

/// PLT paths currently locked by this process.
fn held_paths() -> &'static (Mutex<HashSet<PathBuf>>, Condvar) {
    static HELD: OnceLock<(Mutex<HashSet<PathBuf>>, Condvar)> = OnceLock::new();
    HELD.get_or_init(|| (Mutex::new(HashSet::new()), Condvar::new()))
}

/// In-process half of the lock; releases its path and wakes waiters on drop.
struct HeldPath(PathBuf);

impl HeldPath {
    fn acquire(key: PathBuf) -> Self {
        let (set, cvar) = held_paths();
        let mut held = set.lock().unwrap_or_else(PoisonError::into_inner);
        while held.contains(&key) {
            held = cvar.wait(held).unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(key.clone());
        Self(key)
    }
}

impl Drop for HeldPath {
    fn drop(&mut self) {
        let (set, cvar) = held_paths();
        let mut held = set.lock().unwrap_or_else(PoisonError::into_inner);
        held.remove(&self.0);
        cvar.notify_all();
    }
}

/// Exclusive access to one PLT, released on drop.
///
/// The lock file itself stays on disk after release. Deleting it would let
/// a process that opened the old file and a process that created a new one
/// both believe they hold the lock.
pub struct PltLock {
    lock_path: PathBuf,
    file: File,
    // Dropped after `Drop::drop` unlocks the file.
    _held: HeldPath,
}

impl PltLock {
    /// Acquires exclusive access to `plt`.
    ///
    /// Creates the PLT's parent directory if needed. Blocks while another
    /// thread of this process holds the same PLT; fails with
    /// [`CacheError::Locked`] if another process does.
    pub fn acquire(plt: &Path) -> Result<Self, CacheError> {
        let key = std::path::absolute(plt).unwrap_or_else(|_| plt.to_path_buf());
        let held = HeldPath::acquire(key);

        if let Some(parent) = plt.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let lock_path = lock_file_path(plt);
        let io_err = |e| CacheError::Io {
            path: lock_path.clone(),
            source: e,
        };
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_err)?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.kind() == fs2::lock_contended_error().kind() {
                return Err(CacheError::Locked {
                    path: lock_path.clone(),
                });
            }
            return Err(io_err(e));
        }

        // The pid is informational; a failed write still holds the lock.
        let _ = file.set_len(0).and_then(|()| writeln!(file, "{}", std::process::id()));

        debug!(lock = %lock_path.display(), "acquired PLT lock");
        Ok(Self {
            lock_path,
            file,
            _held: held,
        })
    }
}

impl Drop for PltLock {
    fn drop(&mut self) {
        // Closing the file releases the lock too; unlocking first keeps the
        // release ordered before the in-process waiters wake.
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(lock = %self.lock_path.display(), error = %e, "failed to unlock PLT lock file");
        }
        debug!(lock = %self.lock_path.display(), "released PLT lock");
    }
}

/// Returns `<plt>.lock`.
fn lock_file_path(plt: &Path) -> PathBuf {
    let mut name = OsString::from(plt.as_os_str());
    name.push(LOCK_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn lock_file_name() {
        assert_eq!(
            lock_file_path(Path::new("/c/app.plt")),
            PathBuf::from("/c/app.plt.lock")
        );
    }

    #[test]
    fn acquire_writes_pid_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let plt = dir.path().join("nested").join("app.plt");
        let lock = PltLock::acquire(&plt).unwrap();
        let pid = std::fs::read_to_string(lock_file_path(&plt)).unwrap();
        assert_eq!(pid.trim(), std::process::id().to_string());
        drop(lock);
    }

    #[test]
    fn held_lock_excludes_other_handles() {
        let dir = tempfile::tempdir().unwrap();
        let plt = dir.path().join("app.plt");
        let lock = PltLock::acquire(&plt).unwrap();

        // A separate open file description stands in for another process.
        let other = File::open(lock_file_path(&plt)).unwrap();
        let err = other.try_lock_exclusive().unwrap_err();
        assert_eq!(err.kind(), fs2::lock_contended_error().kind());

        drop(lock);
        other.try_lock_exclusive().unwrap();
        FileExt::unlock(&other).unwrap();
    }

    #[test]
    fn lock_held_elsewhere_is_locked_error() {
        let dir = tempfile::tempdir().unwrap();
        let plt = dir.path().join("app.plt");
        let other = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_file_path(&plt))
            .unwrap();
        other.lock_exclusive().unwrap();

        let err = PltLock::acquire(&plt).err().unwrap();
        assert!(matches!(err, CacheError::Locked { .. }));

        FileExt::unlock(&other).unwrap();
        assert!(PltLock::acquire(&plt).is_ok());
    }

    #[test]
    fn leftover_lock_file_from_dead_holder_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        let plt = dir.path().join("app.plt");
        std::fs::write(lock_file_path(&plt), "12345\n").unwrap();

        let lock = PltLock::acquire(&plt).unwrap();
        let pid = std::fs::read_to_string(lock_file_path(&plt)).unwrap();
        assert_eq!(pid.trim(), std::process::id().to_string());
        drop(lock);
    }

    #[test]
    fn reacquire_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let plt = dir.path().join("app.plt");
        drop(PltLock::acquire(&plt).unwrap());
        drop(PltLock::acquire(&plt).unwrap());
    }

    #[test]
    fn distinct_plts_do_not_contend() {
        let dir = tempfile::tempdir().unwrap();
        let a = PltLock::acquire(&dir.path().join("a.plt")).unwrap();
        let b = PltLock::acquire(&dir.path().join("b.plt")).unwrap();
        drop(a);
        drop(b);
    }

    #[test]
    fn second_thread_waits_for_release() {
        let dir = tempfile::tempdir().unwrap();
        let plt = dir.path().join("app.plt");
        let lock = PltLock::acquire(&plt).unwrap();

        let acquired = Arc::new(AtomicBool::new(false));
        let handle = {
            let acquired = Arc::clone(&acquired);
            let plt = plt.clone();
            thread::spawn(move || {
                let _lock = PltLock::acquire(&plt).unwrap();
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!acquired.load(Ordering::SeqCst));
        drop(lock);
        handle.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
    }
}
