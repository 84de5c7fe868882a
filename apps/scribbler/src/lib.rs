//! # Scribbler application library
//!
//! Library surface of the Scribbler binary: the CLI definitions and command
//! implementations, exposed so integration tests can drive commands without
//! spawning a process.

pub mod cli;
