//! # Scribbler - Desktop Background Scribbler
//!
//! The main binary for the Scribbler history engine.
//!
//! This application provides:
//! - CLI interface for scribbling, undo/redo, and status
//! - Logging/tracing setup
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                apps/scribbler (THE BINARY)                 │
//! │                                                            │
//! │   ┌─────────────┐                  ┌──────────────────┐    │
//! │   │   CLI       │                  │  Background      │    │
//! │   │  (clap)     │                  │  register file   │    │
//! │   └──────┬──────┘                  └────────▲─────────┘    │
//! │          │                                  │              │
//! │          ▼                                  │              │
//! │   ┌────────────────┐   commit/undo/redo     │              │
//! │   │ scribbler-core │────────────────────────┘              │
//! │   │  (THE LOGIC)   │                                       │
//! │   └────────────────┘                                       │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Scribble a new background
//! scribbler scribble "hello world"
//!
//! # Walk the image history
//! scribbler undo
//! scribbler redo
//!
//! # Inspect the workspace
//! scribbler status
//! ```

use clap::Parser;
use scribbler::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — SCRIBBLER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SCRIBBLER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose {
        "scribbler=debug"
    } else {
        "scribbler=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Scribbler startup banner.
fn print_banner() {
    println!(
        r#"
  Scribbler v{} — your desktop background, with history
"#,
        env!("CARGO_PKG_VERSION")
    );
}
