//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use scribbler_core::{
    BackgroundPointer, BackupStore, FilePointer, GradientScribe, ScribbleError, Scribbler,
    TextHistory, Workspace,
};
use std::path::Path;

/// Open the facade over the given workspace and register file.
fn open_scribbler(
    workspace: &Path,
    pointer: &Path,
) -> Result<Scribbler<FilePointer, GradientScribe>, ScribbleError> {
    let ws = Workspace::resolve(workspace)?;
    Scribbler::open(&ws, FilePointer::new(pointer), GradientScribe::new())
}

/// Delete a file if it exists; missing files are fine.
fn remove_if_exists(path: &Path) -> Result<(), ScribbleError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ScribbleError::IoError(format!(
            "Cannot delete '{}': {}",
            path.display(),
            e
        ))),
    }
}

// =============================================================================
// SCRIBBLE COMMAND
// =============================================================================

/// Render a text and commit it as the new background.
pub fn cmd_scribble(
    workspace: &Path,
    pointer: &Path,
    json_mode: bool,
    text: &str,
    width: u32,
    height: u32,
) -> Result<(), ScribbleError> {
    let mut scribbler = open_scribbler(workspace, pointer)?;

    scribbler.scribble(text, width, height)?;
    scribbler.save_history()?;

    let backups = scribbler.engine().store().count()?;
    let staging = scribbler.engine().staging_path().to_path_buf();
    tracing::info!(text, width, height, "scribbled new background");

    if json_mode {
        let output = serde_json::json!({
            "scribbled": text,
            "width": width,
            "height": height,
            "background": staging.to_string_lossy(),
            "backups": backups
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Scribbled:  {}", text);
    println!("Background: {}", staging.display());
    println!("Backups:    {}", backups);
    Ok(())
}

// =============================================================================
// UNDO / REDO COMMANDS
// =============================================================================

/// Step the background one artifact backward.
pub fn cmd_undo(workspace: &Path, pointer: &Path, json_mode: bool) -> Result<(), ScribbleError> {
    let mut scribbler = open_scribbler(workspace, pointer)?;
    scribbler.undo()?;
    report_position("undo", &scribbler, json_mode)
}

/// Step the background one artifact forward.
pub fn cmd_redo(workspace: &Path, pointer: &Path, json_mode: bool) -> Result<(), ScribbleError> {
    let mut scribbler = open_scribbler(workspace, pointer)?;
    scribbler.redo()?;
    report_position("redo", &scribbler, json_mode)
}

fn report_position(
    operation: &str,
    scribbler: &Scribbler<FilePointer, GradientScribe>,
    json_mode: bool,
) -> Result<(), ScribbleError> {
    let position = scribbler.engine().current_position()?;
    let undo_count = scribbler.engine().undo_count();

    if json_mode {
        let output = serde_json::json!({
            "operation": operation,
            "position": position.label(),
            "detail": position.to_string(),
            "undo_count": undo_count
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Position:   {}", position);
    println!("Undo count: {}", undo_count);
    Ok(())
}

// =============================================================================
// TEXT HISTORY COMMANDS
// =============================================================================

/// Walk the text history backward by `steps`.
pub fn cmd_back(workspace: &Path, json_mode: bool, steps: usize) -> Result<(), ScribbleError> {
    let ws = Workspace::resolve(workspace)?;
    let mut history = TextHistory::load_from(&ws.text_history_path())?;

    let mut landed: Option<String> = None;
    for _ in 0..steps {
        match history.back() {
            Some(text) => landed = Some(text.to_string()),
            None => break,
        }
    }

    report_text("back", landed, json_mode);
    Ok(())
}

/// Walk the text history forward by `steps`.
pub fn cmd_forward(workspace: &Path, json_mode: bool, steps: usize) -> Result<(), ScribbleError> {
    let ws = Workspace::resolve(workspace)?;
    let mut history = TextHistory::load_from(&ws.text_history_path())?;

    let mut landed: Option<String> = None;
    for _ in 0..steps {
        match history.forward() {
            Some(text) => landed = Some(text.to_string()),
            None => break,
        }
    }

    report_text("forward", landed, json_mode);
    Ok(())
}

fn report_text(operation: &str, landed: Option<String>, json_mode: bool) {
    if json_mode {
        let output = serde_json::json!({
            "operation": operation,
            "text": landed
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return;
    }

    match landed {
        Some(text) if text.is_empty() => println!("(at the tip - input cleared)"),
        Some(text) => println!("{}", text),
        None => println!("(no further history)"),
    }
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show pointer position, undo counter, and backup entries.
pub fn cmd_status(workspace: &Path, pointer: &Path, json_mode: bool) -> Result<(), ScribbleError> {
    let scribbler = open_scribbler(workspace, pointer)?;
    let engine = scribbler.engine();

    let raw = engine.pointer().get()?;
    let position = engine.classify(&raw);
    let entries = engine.store().entries()?;
    let staging_present = engine.staging_path().is_file();

    if json_mode {
        let output = serde_json::json!({
            "workspace": workspace.to_string_lossy(),
            "register": raw,
            "position": position.label(),
            "detail": position.to_string(),
            "undo_count": engine.undo_count(),
            "staging_present": staging_present,
            "backups": entries.iter().map(|n| n.as_str().to_string()).collect::<Vec<_>>(),
            "texts": scribbler.text_history().len()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Scribbler Workspace Status");
    println!("==========================");
    println!("Workspace:  {}", workspace.display());
    println!("Register:   {}", if raw.is_empty() { "(unset)" } else { raw.as_str() });
    println!();
    println!("Position:   {}", position);
    println!("Undo count: {}", engine.undo_count());
    println!("Staging:    {}", if staging_present { "present" } else { "absent" });
    println!("Texts:      {}", scribbler.text_history().len());
    println!("Backups:    {}", entries.len());
    for name in &entries {
        println!("  {}", name);
    }

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new empty workspace.
pub fn cmd_init(workspace: &Path, force: bool) -> Result<(), ScribbleError> {
    let ws = Workspace::resolve(workspace)?;
    let store = BackupStore::open(ws.backup_dir())?;

    let has_history =
        ws.state_path().is_file() || ws.staging_path().is_file() || store.count()? > 0;
    if has_history && !force {
        return Err(ScribbleError::IoError(format!(
            "Workspace '{}' already has history; use --force to reset it",
            ws.root().display()
        )));
    }

    if force {
        let count = store.count()?;
        store.delete_newest(count)?;
        remove_if_exists(&ws.staging_path())?;
        remove_if_exists(&ws.state_path())?;
        remove_if_exists(&ws.text_history_path())?;
        tracing::info!(workspace = %ws.root().display(), "reset workspace history");
    }

    ws.init()?;
    println!("Initialized workspace at {}", ws.root().display());
    Ok(())
}
