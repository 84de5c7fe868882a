//! # Scribbler CLI Module
//!
//! This module implements the CLI interface for Scribbler.
//!
//! ## Available Commands
//!
//! - `scribble` - Render a text and set it as the new background
//! - `undo` - Step the background one artifact backward
//! - `redo` - Step the background one artifact forward
//! - `back` - Walk the text history backward
//! - `forward` - Walk the text history forward
//! - `status` - Show pointer position, counter, and backup entries
//! - `init` - Initialize a new workspace

mod commands;

use clap::{Parser, Subcommand};
use scribbler_core::ScribbleError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Scribbler - desktop background scribbling with undo/redo
///
/// Renders a text into a background image, points the system background
/// register at it, and keeps a bounded, timestamped backup history that
/// undo/redo walk — even when other actors rewrite the register.
#[derive(Parser, Debug)]
#[command(name = "scribbler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Workspace directory (staging slot, backup store, history files)
    #[arg(short = 'W', long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Background register file (defaults to <workspace>/pointer.txt)
    #[arg(short = 'P', long, global = true)]
    pub pointer: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a text and commit it as the new background
    Scribble {
        /// The text to scribble
        text: String,

        /// Image width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
    },

    /// Step the background one artifact backward
    Undo,

    /// Step the background one artifact forward
    Redo,

    /// Walk the text history backward
    Back {
        /// Number of steps to walk
        #[arg(short, long, default_value = "1")]
        steps: usize,
    },

    /// Walk the text history forward
    Forward {
        /// Number of steps to walk
        #[arg(short, long, default_value = "1")]
        steps: usize,
    },

    /// Show pointer position, undo counter, and backup entries
    Status,

    /// Initialize a new empty workspace
    Init {
        /// Force initialization even if the workspace has history
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ScribbleError> {
    let pointer = cli
        .pointer
        .unwrap_or_else(|| cli.workspace.join("pointer.txt"));
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Scribble {
            text,
            width,
            height,
        }) => cmd_scribble(&cli.workspace, &pointer, json_mode, &text, width, height),
        Some(Commands::Undo) => cmd_undo(&cli.workspace, &pointer, json_mode),
        Some(Commands::Redo) => cmd_redo(&cli.workspace, &pointer, json_mode),
        Some(Commands::Back { steps }) => cmd_back(&cli.workspace, json_mode, steps),
        Some(Commands::Forward { steps }) => cmd_forward(&cli.workspace, json_mode, steps),
        Some(Commands::Status) => cmd_status(&cli.workspace, &pointer, json_mode),
        Some(Commands::Init { force }) => cmd_init(&cli.workspace, force),
        None => {
            // No subcommand - show status by default
            cmd_status(&cli.workspace, &pointer, json_mode)
        }
    }
}
