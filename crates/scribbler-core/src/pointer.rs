//! # System Background Pointer
//!
//! The background pointer is one external mutable register holding the
//! absolute path of the currently displayed artifact. Anyone may write it,
//! not just this engine, so it is modeled as an injected capability and every
//! read is treated as an untrusted snapshot.
//!
//! ## Implementations
//!
//! - [`FilePointer`]: the register is a small text file. Portable stand-in
//!   for a platform wallpaper registry; other processes are free to rewrite
//!   it between any two engine operations.
//! - [`MemoryPointer`]: in-process register for tests.

use crate::types::ScribbleError;
use std::path::{Path, PathBuf};

/// Capability over the externally shared background register.
///
/// `set` failures are fatal for the operation in progress: they are surfaced
/// to the caller and never retried.
pub trait BackgroundPointer {
    /// Read the register. An empty string means the register is unset.
    fn get(&self) -> Result<String, ScribbleError>;

    /// Write the register to the given path.
    fn set(&mut self, path: &Path) -> Result<(), ScribbleError>;
}

// =============================================================================
// FILE-BACKED REGISTER
// =============================================================================

/// Background register backed by a text file holding one path.
///
/// A missing register file reads as unset rather than as an error; the
/// classifier turns that into `Position::Missing` downstream.
#[derive(Debug, Clone)]
pub struct FilePointer {
    path: PathBuf,
}

impl FilePointer {
    /// Create a file-backed register at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the register file itself.
    #[must_use]
    pub fn register_path(&self) -> &Path {
        &self.path
    }
}

impl BackgroundPointer for FilePointer {
    fn get(&self) -> Result<String, ScribbleError> {
        match std::fs::read_to_string(&self.path) {
            Ok(value) => Ok(value.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(ScribbleError::PointerUnreadable(format!(
                "'{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, path: &Path) -> Result<(), ScribbleError> {
        std::fs::write(&self.path, format!("{}\n", path.display())).map_err(|e| {
            ScribbleError::PointerUnwritable(format!("'{}': {}", self.path.display(), e))
        })
    }
}

// =============================================================================
// IN-MEMORY REGISTER
// =============================================================================

/// In-process background register for tests.
///
/// Clones share the same underlying register, mirroring the real resource:
/// a test can keep a handle and rewrite the register "behind the engine's
/// back" the way another process would.
#[derive(Debug, Clone, Default)]
pub struct MemoryPointer {
    register: std::rc::Rc<std::cell::RefCell<String>>,
}

impl MemoryPointer {
    /// Create an unset register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a register preloaded with an arbitrary value.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            register: std::rc::Rc::new(std::cell::RefCell::new(value.into())),
        }
    }

    /// Overwrite the register with an arbitrary raw value, as a foreign
    /// actor would — no path validation, no engine involvement.
    pub fn overwrite(&self, raw: impl Into<String>) {
        *self.register.borrow_mut() = raw.into();
    }
}

impl BackgroundPointer for MemoryPointer {
    fn get(&self) -> Result<String, ScribbleError> {
        Ok(self.register.borrow().clone())
    }

    fn set(&mut self, path: &Path) -> Result<(), ScribbleError> {
        *self.register.borrow_mut() = path.display().to_string();
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
