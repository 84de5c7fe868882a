//! # Scribbler Facade
//!
//! Combines the history engine, a content generator, and the text history
//! into the single surface a UI or CLI layer drives: scribble a new text,
//! undo, redo, and walk previously scribbled texts.
//!
//! The facade adds no policy of its own; it sequences the collaborators.
//! A generation failure commits nothing, and a commit failure records no
//! text history entry.

use crate::engine::HistoryEngine;
use crate::pointer::BackgroundPointer;
use crate::render::ContentGenerator;
use crate::text_history::TextHistory;
use crate::types::ScribbleError;
use crate::workspace::Workspace;
use std::path::PathBuf;

/// The engine + generator + text history aggregate.
#[derive(Debug)]
pub struct Scribbler<P: BackgroundPointer, G: ContentGenerator> {
    engine: HistoryEngine<P>,
    generator: G,
    history: TextHistory,
    history_path: PathBuf,
}

impl<P: BackgroundPointer, G: ContentGenerator> Scribbler<P, G> {
    /// Open a scribbler over a workspace.
    ///
    /// Loads persisted engine state and text history; creates workspace
    /// directories as needed.
    pub fn open(workspace: &Workspace, pointer: P, generator: G) -> Result<Self, ScribbleError> {
        let engine = HistoryEngine::open(workspace, pointer)?;
        let history = TextHistory::load_from(&workspace.text_history_path())?;

        Ok(Self {
            engine,
            generator,
            history,
            history_path: workspace.text_history_path(),
        })
    }

    /// Render `text` at the given dimensions and commit it as the new
    /// present, then record the text in the text history.
    pub fn scribble(&mut self, text: &str, width: u32, height: u32) -> Result<(), ScribbleError> {
        let artifact = self.generator.render(text, width, height)?;
        self.engine.commit(&artifact)?;
        self.history.push(text);
        Ok(())
    }

    /// Step the background one artifact backward.
    pub fn undo(&mut self) -> Result<(), ScribbleError> {
        self.engine.undo()
    }

    /// Step the background one artifact forward.
    pub fn redo(&mut self) -> Result<(), ScribbleError> {
        self.engine.redo()
    }

    /// Walk the text history backward; `None` at the oldest entry.
    pub fn back_text(&mut self) -> Option<&str> {
        self.history.back()
    }

    /// Walk the text history forward; the empty string marks the tip.
    pub fn forward_text(&mut self) -> Option<&str> {
        self.history.forward()
    }

    /// Persist the text history to its workspace file.
    pub fn save_history(&self) -> Result<(), ScribbleError> {
        self.history.save_to(&self.history_path)
    }

    /// The underlying history engine (read-only).
    #[must_use]
    pub fn engine(&self) -> &HistoryEngine<P> {
        &self.engine
    }

    /// The in-memory text history (read-only).
    #[must_use]
    pub fn text_history(&self) -> &TextHistory {
        &self.history
    }
}

// =============================================================================
// TESTS
// =============================================================================
