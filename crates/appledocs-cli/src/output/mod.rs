//! Markdown rendering for command output.

pub mod markdown;
