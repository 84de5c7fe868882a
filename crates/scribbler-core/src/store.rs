//! # Backup Store
//!
//! A directory of persisted artifact copies, each named with a sortable
//! creation timestamp. Lexicographic order over file names equals
//! chronological archive order, which is what undo/redo navigation and
//! eviction are built on.
//!
//! The store is enumerated fresh on every operation; nothing about the
//! directory contents is cached. Entries are never mutated after creation,
//! only created (archive) and deleted (eviction, divergent-write truncation).

use crate::types::{BackupName, ScribbleError};
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};

/// Capacity-bounded, timestamp-ordered directory of historical artifacts.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ScribbleError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            ScribbleError::StoreIo(format!("Cannot create '{}': {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    /// The store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of the entry with the given name.
    #[must_use]
    pub fn path_of(&self, name: &BackupName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    // =========================================================================
    // ENUMERATION
    // =========================================================================

    /// Enumerate all entries, sorted ascending by name (oldest first).
    ///
    /// A store directory that has disappeared out from under the engine
    /// enumerates as empty rather than failing; the next commit recreates it.
    pub fn entries(&self) -> Result<Vec<BackupName>, ScribbleError> {
        let read = match std::fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ScribbleError::StoreIo(format!(
                    "Cannot enumerate '{}': {}",
                    self.dir.display(),
                    e
                )));
            }
        };

        let mut names = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| {
                ScribbleError::StoreIo(format!(
                    "Cannot enumerate '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?;
            if entry.path().is_file() {
                names.push(BackupName::new(entry.file_name().to_string_lossy().into_owned()));
            }
        }
        names.sort();
        Ok(names)
    }

    /// Number of entries currently in the store.
    pub fn count(&self) -> Result<usize, ScribbleError> {
        Ok(self.entries()?.len())
    }

    /// The lexicographically greatest entry (most recently archived), if any.
    pub fn newest(&self) -> Result<Option<BackupName>, ScribbleError> {
        Ok(self.entries()?.pop())
    }

    /// The greatest entry strictly less than `name` (next older), if any.
    pub fn next_older(&self, name: &BackupName) -> Result<Option<BackupName>, ScribbleError> {
        Ok(self
            .entries()?
            .into_iter()
            .rev()
            .find(|candidate| candidate < name))
    }

    /// The smallest entry strictly greater than `name` (next newer), if any.
    pub fn next_newer(&self, name: &BackupName) -> Result<Option<BackupName>, ScribbleError> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|candidate| candidate > name))
    }

    // =========================================================================
    // NAMING
    // =========================================================================

    /// Choose the archive name for an artifact archived at `at`.
    ///
    /// The returned name is guaranteed lexicographically greater than every
    /// timestamped entry already in the store: if the wall clock regressed or
    /// two archives land in the same millisecond, the name is bumped one
    /// millisecond past the current newest. Ordering stays intact without
    /// trusting the clock.
    pub fn next_name(&self, at: DateTime<Utc>) -> Result<BackupName, ScribbleError> {
        let candidate = BackupName::from_timestamp(at);

        let newest_timestamped = self
            .entries()?
            .into_iter()
            .rev()
            .find_map(|name| name.timestamp().map(|ts| (name, ts)));

        if let Some((name, ts)) = newest_timestamped
            && candidate <= name
        {
            return Ok(BackupName::from_timestamp(ts + Duration::milliseconds(1)));
        }
        Ok(candidate)
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Archive a copy of `src` under `name`.
    ///
    /// Copy, not move: the source continues to represent the present until
    /// it is overwritten by the commit that follows.
    pub fn archive_copy(&self, src: &Path, name: &BackupName) -> Result<(), ScribbleError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ScribbleError::StoreIo(format!("Cannot create '{}': {}", self.dir.display(), e))
        })?;
        let dest = self.path_of(name);
        std::fs::copy(src, &dest).map_err(|e| {
            ScribbleError::StoreIo(format!(
                "Cannot archive '{}' as '{}': {}",
                src.display(),
                dest.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Delete entries beyond the most recent `cap`, returning how many went.
    ///
    /// Entries are ordered by name descending; the first `cap` survive.
    pub fn evict_beyond(&self, cap: usize) -> Result<usize, ScribbleError> {
        let mut entries = self.entries()?;
        entries.reverse();
        let doomed: Vec<BackupName> = entries.into_iter().skip(cap).collect();
        let count = doomed.len();
        for name in doomed {
            self.remove(&name)?;
        }
        Ok(count)
    }

    /// Delete the `count` most recently named entries, returning how many went.
    ///
    /// This is the divergent-write truncation step: a fresh commit after
    /// multiple undos invalidates the redo-only branch these entries held.
    pub fn delete_newest(&self, count: usize) -> Result<usize, ScribbleError> {
        let mut entries = self.entries()?;
        entries.reverse();
        let doomed: Vec<BackupName> = entries.into_iter().take(count).collect();
        let deleted = doomed.len();
        for name in doomed {
            self.remove(&name)?;
        }
        Ok(deleted)
    }

    /// Delete one entry by name.
    fn remove(&self, name: &BackupName) -> Result<(), ScribbleError> {
        let path = self.path_of(name);
        std::fs::remove_file(&path).map_err(|e| {
            ScribbleError::StoreIo(format!("Cannot delete '{}': {}", path.display(), e))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
