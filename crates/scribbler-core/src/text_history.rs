//! # Text History
//!
//! Append-only log of scribbled texts with a back/forward cursor, so the
//! input box can be refilled with earlier texts. Much simpler than the
//! image history: no external actor can touch it, so no reconciliation.
//!
//! Cursor model, with 5 entries:
//!
//! ```text
//! [0][1][2][3][4] *   back -> 4, back again -> 3, ...
//! ```
//!
//! The cursor starts one past the end ("the tip"). Stepping forward onto the
//! tip yields the empty string — the input box clears — and stepping forward
//! past the tip yields nothing.

use crate::primitives::MAX_SAVED_TEXTS;
use crate::types::ScribbleError;
use std::path::Path;

/// Append-only text log with a navigation cursor.
#[derive(Debug, Clone, Default)]
pub struct TextHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl TextHistory {
    /// Create an empty history with the cursor at the tip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load history from a file of one entry per line.
    ///
    /// A missing file is an empty history, not an error.
    pub fn load_from(path: &Path) -> Result<Self, ScribbleError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(ScribbleError::IoError(format!(
                    "Cannot read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let entries: Vec<String> = contents.lines().map(str::to_string).collect();
        let cursor = entries.len();
        Ok(Self { entries, cursor })
    }

    /// Persist the most recent [`MAX_SAVED_TEXTS`] entries, one per line.
    pub fn save_to(&self, path: &Path) -> Result<(), ScribbleError> {
        let skip = self.entries.len().saturating_sub(MAX_SAVED_TEXTS);
        let mut contents = String::new();
        for entry in &self.entries[skip..] {
            contents.push_str(entry);
            contents.push('\n');
        }
        std::fs::write(path, contents).map_err(|e| {
            ScribbleError::IoError(format!("Cannot write '{}': {}", path.display(), e))
        })
    }

    /// Append an entry and move the cursor to the tip.
    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
        self.cursor = self.entries.len();
    }

    /// Step backward; returns the previous entry, or `None` at the oldest.
    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step forward; returns the next entry, the empty string when stepping
    /// onto the tip, or `None` when already at the tip.
    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor == self.entries.len() {
            return None;
        }
        self.cursor += 1;
        if self.cursor == self.entries.len() {
            Some("")
        } else {
            self.entries.get(self.cursor).map(String::as_str)
        }
    }

    /// Number of entries in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
