//! Samples command implementation.

use crate::output::markdown;
use anyhow::Result;
use appledocs_core::samples::list_samples;
use appledocs_core::{DocsClient, Sample, SampleFilters};

/// Executes the samples command and prints a Markdown document.
pub async fn execute(client: &DocsClient, filters: &SampleFilters) -> Result<()> {
    match list_samples(client, filters).await {
        Ok(samples) => print!("{}", render(&samples)),
        Err(e) => print!("{}", markdown::error_block("Sample Code", &e, None)),
    }
    Ok(())
}

fn render(samples: &[Sample]) -> String {
    let mut out = String::from("# Sample Code\n\n");

    if samples.is_empty() {
        out.push_str("No samples matched the given filters.\n");
        return out;
    }

    for sample in samples {
        let featured = if sample.featured { " ⭐" } else { "" };
        out.push_str(&format!(
            "- **[{}]({})**{featured}{}",
            sample.title,
            sample.url,
            markdown::beta_badge(sample.beta)
        ));
        if !sample.framework.is_empty() {
            out.push_str(&format!(" · {}", sample.framework));
        }
        out.push('\n');
        if !sample.description.is_empty() {
            out.push_str(&format!("  {}\n", sample.description));
        }
    }

    out.push('\n');
    out.push_str(&markdown::count_line(samples.len(), "sample"));
    out.push('\n');
    out
}
