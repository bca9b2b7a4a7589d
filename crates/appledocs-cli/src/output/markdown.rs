//! Shared Markdown assembly helpers.
//!
//! Pure string building only; every decision about what to show has already
//! been made by the time these run.

use std::fmt::Display;

/// Inline beta marker, empty when not beta.
#[must_use]
pub const fn beta_badge(beta: bool) -> &'static str {
    if beta { " **(Beta)**" } else { "" }
}

/// Inline deprecation marker, empty when not deprecated.
#[must_use]
pub const fn deprecated_badge(deprecated: bool) -> &'static str {
    if deprecated { " ~~(Deprecated)~~" } else { "" }
}

/// Singular/plural result count line.
#[must_use]
pub fn count_line(count: usize, noun: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("_{count} {noun}{plural}._")
}

/// Renders an upstream failure as an inline Markdown error message.
///
/// This is the final catch boundary's output: a heading for context, the
/// original error text, and optionally a direct link to try manually.
#[must_use]
pub fn error_block(context: &str, error: &dyn Display, manual_url: Option<&str>) -> String {
    let mut out = format!("# {context}\n\nError: {error}\n");
    if let Some(url) = manual_url {
        out.push_str(&format!("\nTry it in your browser: {url}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges() {
        assert_eq!(beta_badge(true), " **(Beta)**");
        assert_eq!(beta_badge(false), "");
        assert_eq!(deprecated_badge(true), " ~~(Deprecated)~~");
    }

    #[test]
    fn test_count_line_pluralization() {
        assert_eq!(count_line(1, "result"), "_1 result._");
        assert_eq!(count_line(3, "result"), "_3 results._");
    }

    #[test]
    fn test_error_block_with_manual_link() {
        let out = error_block(
            "Documentation",
            &"Not found: /documentation/nope",
            Some("https://developer.apple.com/documentation/nope"),
        );
        assert!(out.starts_with("# Documentation\n"));
        assert!(out.contains("Error: Not found"));
        assert!(out.contains("Try it in your browser: https://developer.apple.com"));
    }
}
