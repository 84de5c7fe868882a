//! # Core Type Definitions
//!
//! This module contains all core types for the Scribbler history engine:
//! - Backup entry naming (`BackupName`)
//! - Pointer classification (`Position`)
//! - Generated output (`Artifact`)
//! - Error types (`ScribbleError`)
//!
//! ## Ordering Guarantees
//!
//! `BackupName` orders lexicographically over the full file name. Because
//! timestamped names are fixed-width and zero-padded, lexicographic order
//! equals chronological archive order; this ordering is load-bearing for
//! undo/redo navigation and eviction.

use crate::primitives::{BACKUP_NAME_PREFIX, BACKUP_NAME_SUFFIX, BACKUP_TIMESTAMP_FORMAT};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// BACKUP ENTRY NAMES
// =============================================================================

/// File name of one backup store entry.
///
/// Entries are compared by raw file name. Names produced by
/// [`BackupName::from_timestamp`] sort chronologically; foreign files that
/// somehow land in the store directory still participate in ordering by
/// whatever name they carry, matching how the store enumerates its directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BackupName(pub String);

impl BackupName {
    /// Create a backup name from a raw file name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Create the canonical name for an artifact archived at `at`.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{}{}",
            BACKUP_NAME_PREFIX,
            at.format(BACKUP_TIMESTAMP_FORMAT),
            BACKUP_NAME_SUFFIX
        ))
    }

    /// Parse the archive timestamp back out of a canonical name.
    ///
    /// Returns `None` for names that do not follow the canonical
    /// `Background_<timestamp>.bmp` pattern.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let middle = self
            .0
            .strip_prefix(BACKUP_NAME_PREFIX)?
            .strip_suffix(BACKUP_NAME_SUFFIX)?;
        NaiveDateTime::parse_from_str(middle, BACKUP_TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BackupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// POSITION
// =============================================================================

/// Classified location of the system background pointer.
///
/// Classification happens at read time and is never stored; the pointer is
/// externally writable, so every operation reclassifies a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// The pointer denotes the staging slot (the newest committed artifact).
    Staging,
    /// The pointer denotes a specific backup store entry.
    BackupEntry(BackupName),
    /// The pointer denotes an existing path this engine does not recognize.
    Foreign(PathBuf),
    /// The pointer does not resolve to an existing path.
    Missing,
}

impl Position {
    /// Short label for status output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Position::Staging => "staging",
            Position::BackupEntry(_) => "backup",
            Position::Foreign(_) => "foreign",
            Position::Missing => "missing",
        }
    }

    /// Check whether the pointer is in a state the engine recognizes.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        matches!(self, Position::Staging | Position::BackupEntry(_))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Staging => write!(f, "staging"),
            Position::BackupEntry(name) => write!(f, "backup:{}", name),
            Position::Foreign(path) => write!(f, "foreign:{}", path.display()),
            Position::Missing => write!(f, "missing"),
        }
    }
}

// =============================================================================
// ARTIFACT
// =============================================================================

/// An Artifact is one generated background image.
///
/// The engine never inspects artifact contents; it only writes, copies, and
/// deletes them as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Artifact {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Create an artifact from encoded bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Size of the encoded image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the artifact holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Scribbler system.
///
/// - No silent failures
/// - Use `Result<T, ScribbleError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
///
/// Boundary undo/redo and unrecognized pointer states are designed no-ops,
/// not errors; nothing here represents them.
#[derive(Debug, Error)]
pub enum ScribbleError {
    /// The content generator failed; no state was mutated.
    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    /// The system background pointer could not be read.
    #[error("Background pointer unreadable: {0}")]
    PointerUnreadable(String),

    /// The system background pointer could not be written.
    #[error("Background pointer unwritable: {0}")]
    PointerUnwritable(String),

    /// A copy/move/delete inside the backup store or staging slot failed.
    #[error("Backup store I/O error: {0}")]
    StoreIo(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred outside the backup store.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn backup_name_roundtrips_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 35, 2).single().expect("valid date")
            + chrono::Duration::milliseconds(117);
        let name = BackupName::from_timestamp(at);

        assert_eq!(name.as_str(), "Background_20240309T143502.117.bmp");
        assert_eq!(name.timestamp(), Some(at));
    }

    #[test]
    fn backup_name_ordering_is_chronological() {
        let early = Utc.with_ymd_and_hms(2024, 3, 9, 14, 35, 2).single().expect("valid date");
        let late = early + chrono::Duration::milliseconds(1);

        assert!(BackupName::from_timestamp(early) < BackupName::from_timestamp(late));
    }

    #[test]
    fn foreign_name_has_no_timestamp() {
        assert_eq!(BackupName::new("notes.txt").timestamp(), None);
        assert_eq!(BackupName::new("Background_garbage.bmp").timestamp(), None);
    }

    #[test]
    fn position_labels() {
        assert_eq!(Position::Staging.label(), "staging");
        assert_eq!(Position::Missing.label(), "missing");
        assert!(Position::Staging.is_recognized());
        assert!(!Position::Foreign(PathBuf::from("/tmp/x")).is_recognized());
    }

    #[test]
    fn artifact_is_empty() {
        assert!(Artifact::default().is_empty());
        assert_eq!(Artifact::new(vec![1, 2, 3]).len(), 3);
    }
}
