//! # Engine State Format
//!
//! Binary serialization for the persisted engine state.
//!
//! Format: Header (5 bytes) + postcard-serialized payload.
//! - 4 bytes: Magic ("SCRB")
//! - 1 byte: Version
//!
//! The state file carries only what cannot be re-derived from the backup
//! store directory: the undo counter. Oldest/newest markers are re-derived
//! from entry names on every read, so they are not persisted.
//!
//! Pre-deserialization validation caps the payload size and checks the
//! header before parsing, so a corrupted or foreign file fails cleanly.

use crate::primitives::{FORMAT_VERSION, MAGIC_BYTES};
use crate::types::ScribbleError;
use serde::{Deserialize, Serialize};

/// Maximum allowed payload size for the state format.
///
/// The real payload is a handful of bytes; anything larger is corruption.
/// Validated BEFORE attempting deserialization.
pub const MAX_STATE_PAYLOAD_SIZE: usize = 4096;

/// Minimum valid file size (header only).
const MIN_FILE_SIZE: usize = 5;

// =============================================================================
// PERSISTED STATE
// =============================================================================

/// Engine state that survives restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineState {
    /// Consecutive undo steps not yet overtaken by a redo or invalidated
    /// by a new commit.
    pub undo_count: u32,
}

impl EngineState {
    /// Create a fresh, fully-forward state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// FILE HEADER
// =============================================================================

/// The state header precedes the payload.
#[derive(Debug, Clone, Copy)]
pub struct StateHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl StateHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), ScribbleError> {
        if &self.magic != MAGIC_BYTES {
            return Err(ScribbleError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(ScribbleError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScribbleError> {
        if bytes.len() < MIN_FILE_SIZE {
            return Err(ScribbleError::SerializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for StateHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize engine state to bytes (header + payload).
///
/// This is a pure transformation - no file I/O.
pub fn state_to_bytes(state: &EngineState) -> Result<Vec<u8>, ScribbleError> {
    let header = StateHeader::new();

    let payload = postcard::to_stdvec(state)
        .map_err(|e| ScribbleError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(5 + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize engine state from bytes.
///
/// Validates minimum size, maximum payload size, and the header before
/// touching the payload.
pub fn state_from_bytes(bytes: &[u8]) -> Result<EngineState, ScribbleError> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(ScribbleError::SerializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_STATE_PAYLOAD_SIZE {
        return Err(ScribbleError::SerializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_STATE_PAYLOAD_SIZE
        )));
    }

    let header = StateHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[5..];
    let state: EngineState = postcard::from_bytes(payload).map_err(|e| {
        ScribbleError::SerializationError(format!("Failed to deserialize state: {}", e))
    })?;

    Ok(state)
}

// =============================================================================
// TESTS
// =============================================================================
