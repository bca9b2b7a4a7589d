//! Symbols command implementation.

use crate::output::markdown;
use anyhow::Result;
use appledocs_core::symbols::{framework_display_name, list_symbols};
use appledocs_core::{DocsClient, Symbol, SymbolQuery};

/// Executes the symbols command and prints a Markdown document.
pub async fn execute(client: &DocsClient, query: &SymbolQuery) -> Result<()> {
    match list_symbols(client, query).await {
        Ok(symbols) => print!("{}", render(&query.framework, &symbols)),
        Err(e) => print!("{}", markdown::error_block("Symbols", &e, None)),
    }
    Ok(())
}

fn render(framework: &str, symbols: &[Symbol]) -> String {
    let mut out = format!("# {} Symbols\n\n", framework_display_name(framework));

    if symbols.is_empty() {
        out.push_str("No symbols matched the given filters.\n");
        return out;
    }

    // Symbols arrive in index document order, so entries sharing a
    // group-marker category sit next to each other.
    let mut current_category: Option<&str> = None;
    for symbol in symbols {
        if current_category != Some(symbol.category.as_str()) {
            current_category = Some(symbol.category.as_str());
            let heading = if symbol.category.is_empty() {
                "General"
            } else {
                &symbol.category
            };
            out.push_str(&format!("## {heading}\n\n"));
        }
        out.push_str(&format!(
            "- [`{}`]({}) — {}{}{}\n",
            symbol.name,
            symbol.url,
            symbol.kind.as_str(),
            markdown::beta_badge(symbol.beta),
            markdown::deprecated_badge(symbol.deprecated)
        ));
    }

    out.push('\n');
    out.push_str(&markdown::count_line(symbols.len(), "symbol"));
    out.push('\n');
    out
}
