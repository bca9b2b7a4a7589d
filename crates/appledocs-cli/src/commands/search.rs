//! Search command implementation.

use crate::output::markdown;
use anyhow::Result;
use appledocs_core::search::search;
use appledocs_core::{DocsClient, HitKind, SearchHit, SearchScope};

/// Executes the search command and prints a Markdown document.
pub async fn execute(
    client: &DocsClient,
    query: &str,
    scope: SearchScope,
    limit: usize,
) -> Result<()> {
    match search(client, query, scope, limit).await {
        Ok(hits) => print!("{}", render(query, &hits)),
        Err(e) => print!("{}", markdown::error_block("Search", &e, None)),
    }
    Ok(())
}

fn render(query: &str, hits: &[SearchHit]) -> String {
    let mut out = format!("# Search Results: {query}\n\n");

    if hits.is_empty() {
        out.push_str(&format!("No results found for `{query}`.\n"));
        return out;
    }

    for (i, hit) in hits.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{}]({}){}\n",
            i + 1,
            hit.title,
            hit.url,
            kind_label(hit.kind)
        ));
        if !hit.description.is_empty() {
            out.push_str(&format!("   {}\n", hit.description));
        }
    }

    out.push('\n');
    out.push_str(&markdown::count_line(hits.len(), "result"));
    out.push('\n');
    out
}

const fn kind_label(kind: HitKind) -> &'static str {
    match kind {
        HitKind::Documentation => " — Documentation",
        HitKind::SampleCode => " — Sample Code",
        HitKind::General => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, url: &str, kind: HitKind) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            description: String::new(),
            kind,
        }
    }

    #[test]
    fn test_render_empty() {
        let out = render("navigation stack", &[]);
        assert!(out.contains("No results found for `navigation stack`."));
    }

    #[test]
    fn test_render_numbered_list() {
        let hits = vec![
            hit(
                "NavigationStack",
                "https://developer.apple.com/documentation/swiftui/navigationstack",
                HitKind::Documentation,
            ),
            hit(
                "Cookbook",
                "https://developer.apple.com/videos/1",
                HitKind::General,
            ),
        ];
        let out = render("navigation", &hits);
        assert!(out.starts_with("# Search Results: navigation\n"));
        assert!(out.contains("1. [NavigationStack](https://developer.apple.com/documentation/swiftui/navigationstack) — Documentation"));
        assert!(out.contains("2. [Cookbook](https://developer.apple.com/videos/1)\n"));
        assert!(out.contains("_2 results._"));
    }
}
