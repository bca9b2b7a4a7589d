//! Command implementations for the appledocs CLI.
//!
//! Each command module is the final catch boundary for its query: any error
//! raised by the core is rendered as an inline `Error:` message and the
//! process still exits 0, so a bad query or a network failure never turns
//! into a stack trace.

mod completions;
mod doc;
mod samples;
mod search;
mod symbols;
mod technologies;
mod updates;

pub use completions::generate;
pub use doc::execute as show_doc;
pub use samples::execute as list_samples;
pub use search::execute as search;
pub use symbols::execute as list_symbols;
pub use technologies::execute as list_technologies;
pub use updates::execute as list_updates;
