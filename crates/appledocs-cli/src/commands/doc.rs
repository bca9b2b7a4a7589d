//! Doc command implementation.

use crate::output::markdown;
use anyhow::Result;
use appledocs_core::doc::fetch_doc;
use appledocs_core::urls::{doc_path, web_url};
use appledocs_core::{DocOptions, DocResult, DocsClient};

/// Executes the doc command and prints a Markdown document.
pub async fn execute(client: &DocsClient, url: &str, options: DocOptions) -> Result<()> {
    match fetch_doc(client, url, options).await {
        Ok(doc) => print!("{}", render(&doc)),
        Err(e) => {
            // Errors here get a direct link so the user can try the page
            // manually in a browser.
            let manual = manual_url(url);
            print!(
                "{}",
                markdown::error_block("Documentation", &e, manual.as_deref())
            );
        },
    }
    Ok(())
}

fn manual_url(input: &str) -> Option<String> {
    match doc_path(input) {
        Ok(path) => Some(web_url(&path)),
        Err(_) if input.starts_with("http") => Some(input.to_string()),
        Err(_) => None,
    }
}

fn render(doc: &DocResult) -> String {
    let mut out = format!("# {}{}\n\n", doc.title, markdown::beta_badge(doc.beta));

    if !doc.kind.is_empty() {
        out.push_str(&format!("**{}** · ", doc.kind));
    }
    out.push_str(&format!("<{}>\n\n", doc.url));

    if doc.hops > 0 {
        let plural = if doc.hops == 1 { "" } else { "s" };
        out.push_str(&format!(
            "_Resolved via {} redirect{plural}._\n\n",
            doc.hops
        ));
    }

    if let Some(declaration) = &doc.declaration {
        out.push_str(&format!("```\n{declaration}\n```\n\n"));
    }

    if !doc.summary.is_empty() {
        out.push_str(&format!("{}\n\n", doc.summary));
    }

    if !doc.platforms.is_empty() {
        out.push_str("## Availability\n\n");
        for platform in &doc.platforms {
            let deprecated = platform
                .deprecated_at
                .as_deref()
                .map(|v| format!(", deprecated {v}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "- {} {}+{}{}\n",
                platform.name,
                platform.introduced_at,
                deprecated,
                markdown::beta_badge(platform.beta)
            ));
        }
        out.push('\n');
    }

    render_groups(&mut out, "Topics", &doc.topics);
    render_groups(&mut out, "Relationships", &doc.relationships);
    render_groups(&mut out, "See Also", &doc.see_also);

    if !doc.references.is_empty() {
        out.push_str("## References\n\n");
        for link in &doc.references {
            out.push_str(&format!(
                "- [{}]({}){}\n",
                link.title,
                link.url,
                markdown::beta_badge(link.beta)
            ));
        }
        out.push('\n');
    }

    out
}

fn render_groups(out: &mut String, heading: &str, groups: &[appledocs_core::doc::LinkGroup]) {
    if groups.is_empty() {
        return;
    }
    out.push_str(&format!("## {heading}\n\n"));
    for group in groups {
        if !group.title.is_empty() {
            out.push_str(&format!("### {}\n\n", group.title));
        }
        for link in &group.entries {
            out.push_str(&format!(
                "- [{}]({}){}",
                link.title,
                link.url,
                markdown::beta_badge(link.beta)
            ));
            if !link.summary.is_empty() {
                out.push_str(&format!(" — {}", link.summary));
            }
            out.push('\n');
        }
        out.push('\n');
    }
}
