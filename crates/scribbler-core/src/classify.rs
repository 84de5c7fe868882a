//! # Position Classifier
//!
//! Maps the raw background pointer value to a [`Position`]. The pointer is
//! an externally writable register, so the classifier must be total over
//! arbitrary strings: unresolvable or nonexistent paths classify as
//! `Missing`, valid-but-unrecognized paths as `Foreign`.
//!
//! Classification has no side effects and stores nothing; callers
//! reclassify a fresh pointer snapshot on every operation.

use crate::types::{BackupName, Position};
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

/// Classifies pointer values against the staging slot and backup store.
#[derive(Debug, Clone)]
pub struct PositionClassifier {
    staging: PathBuf,
    backup_dir: PathBuf,
}

impl PositionClassifier {
    /// Build a classifier for the given workspace layout.
    #[must_use]
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            staging: workspace.staging_path(),
            backup_dir: workspace.backup_dir(),
        }
    }

    /// Classify a raw pointer value.
    ///
    /// Resolution uses `canonicalize`, which fails for empty, malformed, and
    /// nonexistent paths alike; all of those are `Missing`. Comparisons run
    /// against the canonicalized staging slot and backup directory so that
    /// symlinked spellings of the same location still classify correctly.
    #[must_use]
    pub fn classify(&self, pointer_value: &str) -> Position {
        let trimmed = pointer_value.trim();
        if trimmed.is_empty() {
            return Position::Missing;
        }

        let resolved = match std::fs::canonicalize(trimmed) {
            Ok(path) => path,
            Err(_) => return Position::Missing,
        };

        if let Ok(staging) = std::fs::canonicalize(&self.staging)
            && resolved == staging
        {
            return Position::Staging;
        }

        if let Some(name) = Self::backup_entry_name(&resolved, &self.backup_dir) {
            return Position::BackupEntry(name);
        }

        Position::Foreign(resolved)
    }

    /// Extract the entry name if `resolved` lives directly in the backup dir.
    fn backup_entry_name(resolved: &Path, backup_dir: &Path) -> Option<BackupName> {
        let backup_dir = std::fs::canonicalize(backup_dir).ok()?;
        if resolved.parent()? != backup_dir {
            return None;
        }
        Some(BackupName::new(
            resolved.file_name()?.to_string_lossy().into_owned(),
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
