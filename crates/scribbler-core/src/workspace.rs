//! # Workspace Layout
//!
//! One base directory holds everything the engine owns: the staging slot,
//! the backup store, the persisted engine state, and the text history file.
//! The engine never writes outside this directory (the background pointer is
//! external and is not owned).

use crate::primitives::{
    BACKUP_DIR_NAME, STAGING_FILE_NAME, STATE_FILE_NAME, TEXT_HISTORY_FILE_NAME,
};
use crate::types::ScribbleError;
use std::path::{Path, PathBuf};

/// Resolved layout of the engine-owned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Resolve a workspace rooted at `root`.
    ///
    /// The root is made absolute against the current directory so that path
    /// comparisons in the classifier are stable regardless of how the caller
    /// spelled the path. No directories are created; see [`Workspace::init`].
    pub fn resolve(root: impl AsRef<Path>) -> Result<Self, ScribbleError> {
        let root = std::path::absolute(root.as_ref())
            .map_err(|e| ScribbleError::IoError(format!("Cannot resolve workspace root: {}", e)))?;
        Ok(Self { root })
    }

    /// Create the workspace directories on disk.
    ///
    /// Idempotent: existing directories are left untouched.
    pub fn init(&self) -> Result<(), ScribbleError> {
        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            ScribbleError::IoError(format!(
                "Cannot create backup directory '{}': {}",
                self.backup_dir().display(),
                e
            ))
        })
    }

    /// The workspace root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the staging slot.
    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        self.root.join(STAGING_FILE_NAME)
    }

    /// Absolute path of the backup store directory.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR_NAME)
    }

    /// Absolute path of the persisted engine state file.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE_NAME)
    }

    /// Absolute path of the persisted text history file.
    #[must_use]
    pub fn text_history_path(&self) -> PathBuf {
        self.root.join(TEXT_HISTORY_FILE_NAME)
    }
}

// =============================================================================
// TESTS
// =============================================================================
