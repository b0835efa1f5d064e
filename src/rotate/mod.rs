//! A file that rolls itself over. Writes append to the active file; once the
//! next write would push it past the size limit, the file is renamed to a
//! timestamped backup and a fresh one is opened. Backups beyond the count or
//! age limits are deleted after every rotation, and the survivors are gzipped
//! in the background when compression is on.
//!
//! All state sits behind one mutex per writer, so writes and rotation
//! decisions from concurrent callers are serialized while two writers never
//! contend with each other.

mod backups;
mod compress;
mod mill;
mod policy;

pub use backups::{BACKUP_TIME_FORMAT, BackupFile, apply_retention, backup_path, list_backups};
pub use policy::{
    DEFAULT_COMPRESS, DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SIZE_MB,
    RotationConfig, RotationPolicy,
};

use crate::Error;
use crate::internal;
use chrono::Local;
use mill::Mill;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct State {
    file: Option<File>,
    size: u64,
    mill: Option<Mill>,
}

pub struct RotatingWriter {
    path: PathBuf,
    policy: RotationPolicy,
    state: Mutex<State>,
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RotatingWriter {
    /// Nothing touches the filesystem until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            state: Mutex::new(State::default()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// A panic on another thread mid-write must not silence logging for the rest of the process.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `buf` as one unit, rotating first if it would not fit.
    ///
    /// # Errors
    /// `Error::WriteTooLarge` when `buf` alone exceeds the size limit, or any
    /// I/O error from creating directories, opening, renaming or writing.
    pub fn write(&self, buf: &[u8]) -> Result<usize, Error> {
        let len = buf.len() as u64;
        if len > self.policy.max_size {
            return Err(Error::WriteTooLarge {
                len,
                max: self.policy.max_size,
            });
        }

        let mut state = self.lock();
        if state.file.is_none() {
            self.open_existing_or_new(&mut state, len)?;
        }
        if state.size + len > self.policy.max_size {
            self.rotate_locked(&mut state)?;
        }

        let Some(file) = state.file.as_mut() else {
            return Err(io::Error::other("active log file is not open").into());
        };
        file.write_all(buf)?;
        state.size += len;
        Ok(buf.len())
    }

    /// Forces a rotation regardless of the active file's size.
    ///
    /// # Errors
    /// I/O errors from renaming the active file or opening the new one.
    pub fn rotate(&self) -> Result<(), Error> {
        let mut state = self.lock();
        self.rotate_locked(&mut state)
    }

    /// # Errors
    /// I/O errors from flushing or syncing the active file.
    pub fn flush(&self) -> Result<(), Error> {
        let mut state = self.lock();
        if let Some(file) = state.file.as_mut() {
            file.flush()?;
            file.sync_data()?;
        }
        Ok(())
    }

    /// Closes the active file. The next write reopens it.
    pub fn close(&self) {
        let mut state = self.lock();
        state.file = None;
        state.size = 0;
    }

    fn open_existing_or_new(&self, state: &mut State, write_len: u64) -> Result<(), Error> {
        let Ok(meta) = fs::metadata(&self.path) else {
            return self.open_new(state);
        };
        if meta.len() + write_len > self.policy.max_size {
            return self.rotate_locked(state);
        }

        match OpenOptions::new().append(true).open(&self.path) {
            Ok(file) => {
                internal::trace("ROTATE", &format!("Reopened {}", self.path.display()));
                state.file = Some(file);
                state.size = meta.len();
                Ok(())
            }
            // Something is wrong with the existing file; start a fresh one.
            Err(_) => self.open_new(state),
        }
    }

    /// Moves an existing active file aside, then creates an empty one.
    fn open_new(&self, state: &mut State) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            if let Err(e) = fs::create_dir_all(parent) {
                internal::error(
                    "ROTATE",
                    &format!("Failed to create directory {}: {e}", parent.display()),
                );
                return Err(e.into());
            }
            internal::debug("ROTATE", &format!("Created directory {}", parent.display()));
        }

        if self.path.exists() {
            let backup = backup_path(&self.path, Local::now());
            fs::rename(&self.path, &backup)?;
            internal::debug(
                "ROTATE",
                &format!("Rotated {} -> {}", self.path.display(), backup.display()),
            );
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        state.file = Some(file);
        state.size = 0;
        Ok(())
    }

    fn rotate_locked(&self, state: &mut State) -> Result<(), Error> {
        state.file = None;
        self.open_new(state)?;
        self.mill(state);
        Ok(())
    }

    /// Retention runs inline so the backup count is already bounded when the
    /// write returns. Only compression is deferred.
    fn mill(&self, state: &mut State) {
        let pending = match apply_retention(&self.path, &self.policy, Local::now()) {
            Ok(pending) => pending,
            Err(e) => {
                internal::warn("ROTATE", &format!("Retention pass failed: {e}"));
                return;
            }
        };
        if pending.is_empty() {
            return;
        }

        if state.mill.is_none() {
            match Mill::spawn() {
                Ok(mill) => state.mill = Some(mill),
                Err(e) => {
                    internal::error(
                        "COMPRESS",
                        &format!("Failed to start compression thread: {e}"),
                    );
                    return;
                }
            }
        }
        if let Some(mill) = &state.mill {
            mill.submit(pending);
        }
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Self::write(self, buf).map_err(into_io)
    }

    fn flush(&mut self) -> io::Result<()> {
        Self::flush(self).map_err(into_io)
    }
}

fn into_io(e: Error) -> io::Error {
    match e {
        Error::Io(e) => e,
        other => io::Error::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small(max: u64) -> RotationPolicy {
        RotationPolicy::new()
            .max_size_bytes(max)
            .max_backups(0)
            .max_age_days(0)
            .compress(false)
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("debug.log");
        let writer = RotatingWriter::new(&path, small(1024));
        writer.write(b"hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        fs::write(&path, "old\n").unwrap();
        let writer = RotatingWriter::new(&path, small(1024));
        writer.write(b"new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
        assert!(list_backups(&path).unwrap().is_empty());
    }

    #[test]
    fn rotates_existing_file_that_would_overflow() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        fs::write(&path, "0123456789").unwrap();
        let writer = RotatingWriter::new(&path, small(12));
        writer.write(b"abcde").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "abcde");
        let backups = list_backups(&path).unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0].path).unwrap(), "0123456789");
    }

    #[test]
    fn rejects_oversized_write() {
        let dir = tempdir().unwrap();
        let writer = RotatingWriter::new(dir.path().join("x.log"), small(4));
        let err = writer.write(b"too long").unwrap_err();
        assert!(matches!(err, Error::WriteTooLarge { len: 8, max: 4 }));
    }

    #[test]
    fn forced_rotate_and_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.log");
        let writer = RotatingWriter::new(&path, small(1024));
        writer.write(b"one\n").unwrap();
        writer.rotate().unwrap();
        writer.write(b"two\n").unwrap();
        writer.close();
        writer.write(b"three\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two\nthree\n");
        assert_eq!(list_backups(&path).unwrap().len(), 1);
    }

    #[test]
    fn io_write_impl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.log");
        let mut writer = RotatingWriter::new(&path, small(1024));
        writeln!(writer, "formatted {}", 7).unwrap();
        Write::flush(&mut writer).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "formatted 7\n");
    }
}
