//! Persistence for the decision history.
//!
//! The on-disk format is a JSON array of [`Decision`] records, newest first:
//!
//! ```json
//! [
//!   {
//!     "id": "6f1c3c52-8d7e-4f0e-9d0a-0d5c7b1a2e3f",
//!     "timestamp": "2026-10-16T12:00:00Z",
//!     "selectedItem": "Bread",
//!     "totalItems": 2,
//!     "title": "Shopping List"
//!   }
//! ]
//! ```
//!
//! A missing file is treated as an empty history. Saving writes a uniquely
//! named temporary file in the same directory and renames it over the target.
//!
//! Writers serialise on a sibling `<file>.lock`: an advisory lock across
//! processes, plus a mutex across threads sharing one [`JsonFileStore`]. The
//! lock is held from load to rename in [`HistoryStore::append`].

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fs2::FileExt;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::history::log::HistoryLog;
use crate::types::Decision;

/// Errors that can occur while loading or saving history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Reading or writing the history file failed.
    #[error("history file I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history file does not contain a valid record array.
    #[error("history file {} is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the history failed.
    #[error("failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Storage backend for the history log.
pub trait HistoryStore {
    /// Loads the stored history, or an empty log if nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if the backing storage cannot be read or
    /// holds malformed data.
    fn load(&self) -> Result<HistoryLog, HistoryError>;

    /// Replaces the stored history with `log`.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if the backing storage cannot be written.
    fn save(&self, log: &HistoryLog) -> Result<(), HistoryError>;

    /// Loads, records one decision, and saves.
    ///
    /// Returns the decision evicted to make room, if any. Stores shared
    /// between writers override this to hold a lock across all three steps.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`load`](Self::load) and [`save`](Self::save).
    fn append(&self, decision: Decision) -> Result<Option<Decision>, HistoryError> {
        let mut log = self.load()?;
        let evicted = log.record(decision);
        self.save(&log)?;
        Ok(evicted)
    }

    /// Removes all stored decisions.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`load`](Self::load) and [`save`](Self::save).
    fn clear(&self) -> Result<(), HistoryError> {
        let mut log = self.load()?;
        log.clear();
        self.save(&log)
    }
}

/// Stores history as a JSON file.
///
/// Clones share the same writer mutex.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    capacity: usize,
    writers: Arc<Mutex<()>>,
}

/// Held while a writer owns the history file.
struct WriteLock<'a> {
    // Closing the file releases the advisory lock before the mutex.
    _file: File,
    _guard: MutexGuard<'a, ()>,
}

impl JsonFileStore {
    /// Creates a store for `path` keeping up to `capacity` decisions.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            writers: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the history file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Takes the writer mutex, then the advisory lock on the lock file.
    fn lock(&self) -> Result<WriteLock<'_>, HistoryError> {
        let guard = self.writers.lock().unwrap_or_else(PoisonError::into_inner);

        fs::create_dir_all(self.dir()).map_err(|e| self.io_error(e))?;
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_error(e))?;
        file.lock_exclusive().map_err(|e| self.io_error(e))?;

        Ok(WriteLock {
            _file: file,
            _guard: guard,
        })
    }

    fn read_log(&self) -> Result<HistoryLog, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Ok(HistoryLog::with_capacity(self.capacity));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(HistoryLog::with_capacity(self.capacity));
        }

        let records: Vec<Decision> =
            serde_json::from_str(&contents).map_err(|source| HistoryError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if records.len() > self.capacity {
            warn!(
                path = %self.path.display(),
                stored = records.len(),
                capacity = self.capacity,
                "History file exceeds capacity, dropping oldest records"
            );
        }

        let log = HistoryLog::from_records(records, self.capacity);
        debug!(path = %self.path.display(), records = log.len(), "History loaded");
        Ok(log)
    }

    /// Writes `log` to a fresh temporary file and renames it into place.
    ///
    /// Callers must hold the [`WriteLock`].
    fn write_log(&self, log: &HistoryLog) -> Result<(), HistoryError> {
        let records = log.to_records();
        let json = serde_json::to_string_pretty(&records).map_err(HistoryError::Serialize)?;

        fs::create_dir_all(self.dir()).map_err(|e| self.io_error(e))?;
        let mut temp = NamedTempFile::new_in(self.dir()).map_err(|e| self.io_error(e))?;
        temp.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        temp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        info!(path = %self.path.display(), records = records.len(), "History saved");
        Ok(())
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<HistoryLog, HistoryError> {
        self.read_log()
    }

    fn save(&self, log: &HistoryLog) -> Result<(), HistoryError> {
        let _lock = self.lock()?;
        self.write_log(log)
    }

    fn append(&self, decision: Decision) -> Result<Option<Decision>, HistoryError> {
        let _lock = self.lock()?;
        let mut log = self.read_log()?;
        let evicted = log.record(decision);
        self.write_log(&log)?;
        Ok(evicted)
    }

    /// Overwrites the file with an empty history without reading it, so a
    /// malformed file can still be cleared.
    fn clear(&self) -> Result<(), HistoryError> {
        let _lock = self.lock()?;
        self.write_log(&HistoryLog::with_capacity(self.capacity))
    }
}

/// Keeps history in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    log: Mutex<HistoryLog>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            log: Mutex::new(HistoryLog::with_capacity(capacity)),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<HistoryLog, HistoryError> {
        Ok(self
            .log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, log: &HistoryLog) -> Result<(), HistoryError> {
        *self.log.lock().unwrap_or_else(PoisonError::into_inner) = log.clone();
        Ok(())
    }

    fn append(&self, decision: Decision) -> Result<Option<Decision>, HistoryError> {
        Ok(self
            .log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(decision))
    }
}
