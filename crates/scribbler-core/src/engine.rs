//! # History Reconciliation Engine
//!
//! Orchestrates Commit, Undo, and Redo over the staging slot, the backup
//! store, and the externally-writable background pointer.
//!
//! The engine owns `undo_count` — how many consecutive undo steps have not
//! yet been overtaken by a redo or invalidated by a fresh commit — but it
//! never trusts the counter alone: every operation re-reads the pointer and
//! reclassifies it, because other actors may have rewritten the register
//! between any two operations. The counter is advisory bookkeeping that
//! drives the commit branching; position is always re-derived.

use crate::classify::PositionClassifier;
use crate::formats::{EngineState, state_from_bytes, state_to_bytes};
use crate::pointer::BackgroundPointer;
use crate::primitives::BACKUP_CAPACITY;
use crate::store::BackupStore;
use crate::types::{Artifact, BackupName, Position, ScribbleError};
use crate::workspace::Workspace;
use chrono::Utc;
use std::path::{Path, PathBuf};

// =============================================================================
// ERROR LOGGING HELPER
// =============================================================================

/// Log an I/O error and convert the Result to a default value.
///
/// The persisted counter is advisory — position is re-derived from the
/// pointer on every operation — so state-file failures are logged and
/// absorbed instead of aborting the operation that triggered them.
///
/// Uses stderr logging for the CORE (no tracing dependency); the app layer
/// configures proper tracing.
#[inline]
fn log_and_default<T: Default>(result: Result<T, ScribbleError>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!(
                "{{\"level\":\"warn\",\"target\":\"scribbler_core::engine\",\"message\":\"I/O error in {}: {}\"}}",
                context, e
            );
            T::default()
        }
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// The history & reconciliation engine.
///
/// Single logical actor: each operation runs to completion before the next
/// is accepted. The only concurrency hazard is external — the pointer — and
/// the defense is reclassifying a fresh snapshot on every read.
#[derive(Debug)]
pub struct HistoryEngine<P: BackgroundPointer> {
    staging: PathBuf,
    state_path: PathBuf,
    store: BackupStore,
    classifier: PositionClassifier,
    pointer: P,
    state: EngineState,
}

impl<P: BackgroundPointer> HistoryEngine<P> {
    /// Open the engine over a workspace, creating directories as needed and
    /// loading any persisted state.
    ///
    /// A missing or unreadable state file starts the engine fully forward
    /// (`undo_count == 0`); corruption is logged, not fatal.
    pub fn open(workspace: &Workspace, pointer: P) -> Result<Self, ScribbleError> {
        workspace.init()?;
        let store = BackupStore::open(workspace.backup_dir())?;
        let state = Self::load_state(&workspace.state_path());

        Ok(Self {
            staging: workspace.staging_path(),
            state_path: workspace.state_path(),
            store,
            classifier: PositionClassifier::new(workspace),
            pointer,
            state,
        })
    }

    fn load_state(path: &Path) -> EngineState {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            // First run: no state yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return EngineState::new(),
            Err(e) => {
                return log_and_default(
                    Err(ScribbleError::IoError(format!(
                        "Cannot read '{}': {}",
                        path.display(),
                        e
                    ))),
                    "load_state",
                );
            }
        };
        log_and_default(state_from_bytes(&bytes), "load_state")
    }

    fn save_state(&self) {
        let result = state_to_bytes(&self.state).and_then(|bytes| {
            std::fs::write(&self.state_path, bytes).map_err(|e| {
                ScribbleError::IoError(format!(
                    "Cannot write '{}': {}",
                    self.state_path.display(),
                    e
                ))
            })
        });
        log_and_default(result, "save_state");
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Consecutive undo steps since the last invalidating commit.
    #[must_use]
    pub fn undo_count(&self) -> u32 {
        self.state.undo_count
    }

    /// The backup store this engine owns.
    #[must_use]
    pub fn store(&self) -> &BackupStore {
        &self.store
    }

    /// The background pointer capability (read-only).
    #[must_use]
    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    /// Absolute path of the staging slot.
    #[must_use]
    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    /// Classify an arbitrary pointer value against this engine's layout.
    #[must_use]
    pub fn classify(&self, pointer_value: &str) -> Position {
        self.classifier.classify(pointer_value)
    }

    /// Read the pointer and classify where it currently points.
    pub fn current_position(&self) -> Result<Position, ScribbleError> {
        let raw = self.pointer.get()?;
        Ok(self.classifier.classify(&raw))
    }

    // =========================================================================
    // COMMIT
    // =========================================================================

    /// Commit a freshly generated artifact as the new present.
    ///
    /// Branching on `undo_count`:
    /// - `0` (fully forward): archive the current staging contents under a
    ///   fresh timestamp name (copy), then evict entries beyond the most
    ///   recent [`BACKUP_CAPACITY`].
    /// - `1`: no archive step — the single undone step is still represented
    ///   by the newest backup entry; archiving again would duplicate it.
    ///   The counter is left unreset (observed behavior, preserved).
    /// - `> 1`: delete the `undo_count - 1` most recently named entries (the
    ///   redo-only branch this write invalidates), reset the counter.
    ///
    /// Then overwrite the staging slot and point the register at it. Archive
    /// and eviction failures abort the commit before the staging slot or the
    /// pointer are touched.
    pub fn commit(&mut self, artifact: &Artifact) -> Result<(), ScribbleError> {
        match self.state.undo_count {
            0 => {
                if self.staging.is_file() {
                    let name = self.store.next_name(Utc::now())?;
                    self.store.archive_copy(&self.staging, &name)?;
                    self.store.evict_beyond(BACKUP_CAPACITY)?;
                }
            }
            1 => {}
            n => {
                self.store.delete_newest((n - 1) as usize)?;
                self.state.undo_count = 0;
                self.save_state();
            }
        }

        std::fs::write(&self.staging, &artifact.bytes).map_err(|e| {
            ScribbleError::StoreIo(format!(
                "Cannot write staging slot '{}': {}",
                self.staging.display(),
                e
            ))
        })?;
        self.pointer.set(&self.staging)?;
        Ok(())
    }

    // =========================================================================
    // UNDO
    // =========================================================================

    /// Step backward one artifact.
    ///
    /// The pointer is read and reclassified first:
    /// - `Missing`/`Foreign`: fall back to the staging slot if it exists
    ///   (no counter change); otherwise no-op. An unrecognized present is
    ///   treated as "assume we are at the newest known artifact".
    /// - `Staging`: step to the newest backup entry, if any.
    /// - `BackupEntry`: step to the next older entry, if any.
    ///
    /// Boundary cases are no-ops, not errors. Undo never deletes artifacts.
    pub fn undo(&mut self) -> Result<(), ScribbleError> {
        let raw = self.pointer.get()?;
        match self.classifier.classify(&raw) {
            Position::Missing | Position::Foreign(_) => {
                if self.staging.is_file() {
                    self.pointer.set(&self.staging)?;
                }
            }
            Position::Staging => {
                if let Some(newest) = self.store.newest()? {
                    self.step_to(&newest)?;
                    self.note_step_back();
                }
            }
            Position::BackupEntry(name) => {
                if let Some(older) = self.store.next_older(&name)? {
                    self.step_to(&older)?;
                    self.note_step_back();
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // REDO
    // =========================================================================

    /// Step forward one artifact.
    ///
    /// Redo only makes sense when currently viewing a backup entry:
    /// - `Missing`/`Foreign`/`Staging`: no-op.
    /// - `BackupEntry`: step to the next newer entry; if this entry is the
    ///   newest backup, step to the staging slot if it exists.
    ///
    /// The counter decrement is saturating and only accompanies a successful
    /// pointer write. Redo never deletes artifacts.
    pub fn redo(&mut self) -> Result<(), ScribbleError> {
        let raw = self.pointer.get()?;
        match self.classifier.classify(&raw) {
            Position::Missing | Position::Foreign(_) | Position::Staging => {}
            Position::BackupEntry(name) => {
                if let Some(newer) = self.store.next_newer(&name)? {
                    self.step_to(&newer)?;
                    self.note_step_forward();
                } else if self.staging.is_file() {
                    self.pointer.set(&self.staging)?;
                    self.note_step_forward();
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // INTERNAL STEPS
    // =========================================================================

    fn step_to(&mut self, name: &BackupName) -> Result<(), ScribbleError> {
        let path = self.store.path_of(name);
        self.pointer.set(&path)
    }

    fn note_step_back(&mut self) {
        self.state.undo_count = self.state.undo_count.saturating_add(1);
        self.save_state();
    }

    fn note_step_forward(&mut self) {
        self.state.undo_count = self.state.undo_count.saturating_sub(1);
        self.save_state();
    }
}

// =============================================================================
// TESTS
// =============================================================================
