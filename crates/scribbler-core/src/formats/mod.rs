//! # Persistence Formats
//!
//! Binary framing for the engine's persisted state. Pure byte transforms;
//! file I/O lives with the engine that owns the state file.

mod state;

pub use state::{EngineState, MAX_STATE_PAYLOAD_SIZE, StateHeader, state_from_bytes, state_to_bytes};
