//! # scribbler-core
//!
//! The history & reconciliation engine for Scribbler - THE LOGIC.
//!
//! This crate decides, on every undo/redo request, what the *current*
//! external state actually is, classifies it against its own bookkeeping,
//! computes the next artifact to present, and maintains a capacity-bounded,
//! chronologically ordered backup set with correct eviction on divergent
//! writes.
//!
//! ## The Ambient Hazard
//!
//! The system background pointer is a shared mutable register that other
//! processes may rewrite at any time. This crate's entire defense is to
//! treat every read as a fresh, untrusted snapshot and reclassify it
//! (`Position`), never caching, and to fall back to the newest known
//! artifact whenever the register points at nothing recognizable.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is the ONLY place where history bookkeeping exists (stateful)
//! - Is sequential: one logical actor, no internal concurrency
//! - Owns the backup store and staging slot exclusively; never writes
//!   outside the workspace
//! - Never assumes exclusive ownership of the background pointer
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod classify;
pub mod engine;
pub mod formats;
pub mod pointer;
pub mod primitives;
pub mod render;
pub mod scribbler;
pub mod store;
pub mod text_history;
pub mod types;
pub mod workspace;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Artifact, BackupName, Position, ScribbleError};

// =============================================================================
// RE-EXPORTS: History Engine
// =============================================================================

pub use classify::PositionClassifier;
pub use engine::HistoryEngine;
pub use pointer::{BackgroundPointer, FilePointer, MemoryPointer};
pub use scribbler::Scribbler;
pub use store::BackupStore;
pub use text_history::TextHistory;
pub use workspace::Workspace;

// =============================================================================
// RE-EXPORTS: Generation & Formats
// =============================================================================

pub use formats::{EngineState, state_from_bytes, state_to_bytes};
pub use render::{ContentGenerator, GradientScribe};
