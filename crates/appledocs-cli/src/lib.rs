//! appledocs CLI - Apple Developer documentation from the terminal
//!
//! Command implementations live in [`commands`], one module per
//! subcommand. Everything prints Markdown to stdout; upstream failures
//! are rendered inline instead of aborting the process.

pub mod cli;
pub mod commands;
pub mod output;
