//! Updates command implementation.

use crate::output::markdown;
use anyhow::Result;
use appledocs_core::updates::list_updates;
use appledocs_core::{DocsClient, UpdateCategory, UpdateEntry, UpdateFilters};

/// Executes the updates command and prints a Markdown document.
pub async fn execute(client: &DocsClient, filters: &UpdateFilters) -> Result<()> {
    match list_updates(client, filters).await {
        Ok(entries) => print!("{}", render(&entries)),
        Err(e) => print!("{}", markdown::error_block("Documentation Updates", &e, None)),
    }
    Ok(())
}

const fn category_label(category: UpdateCategory) -> &'static str {
    match category {
        UpdateCategory::Wwdc => "WWDC",
        UpdateCategory::Technology => "Technology",
        UpdateCategory::ReleaseNotes => "Release Notes",
    }
}

fn render(entries: &[UpdateEntry]) -> String {
    let mut out = String::from("# Documentation Updates\n\n");

    if entries.is_empty() {
        out.push_str("No updates matched the given filters.\n");
        return out;
    }

    // Entries arrive newest year first, year-less entries at the end.
    let mut current_year: Option<Option<u16>> = None;
    for entry in entries {
        if current_year != Some(entry.year) {
            current_year = Some(entry.year);
            match entry.year {
                Some(year) => out.push_str(&format!("## {year}\n\n")),
                None => out.push_str("## Undated\n\n"),
            }
        }
        out.push_str(&format!(
            "- **[{}]({})**{} · {}\n",
            entry.title,
            entry.url,
            markdown::beta_badge(entry.beta),
            category_label(entry.category)
        ));
        if !entry.description.is_empty() {
            out.push_str(&format!("  {}\n", entry.description));
        }
    }

    out.push('\n');
    out.push_str(&markdown::count_line(entries.len(), "update"));
    out.push('\n');
    out
}
