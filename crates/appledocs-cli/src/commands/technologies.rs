//! Technologies command implementation.

use crate::output::markdown;
use anyhow::Result;
use appledocs_core::technologies::list_technologies;
use appledocs_core::{DocsClient, Technology, TechnologyFilters};

/// Executes the technologies command and prints a Markdown document.
pub async fn execute(client: &DocsClient, filters: &TechnologyFilters) -> Result<()> {
    match list_technologies(client, filters).await {
        Ok(technologies) => print!("{}", render(&technologies)),
        Err(e) => print!("{}", markdown::error_block("Technologies", &e, None)),
    }
    Ok(())
}

fn render(technologies: &[Technology]) -> String {
    let mut out = String::from("# Apple Technologies\n\n");

    if technologies.is_empty() {
        out.push_str("No technologies matched the given filters.\n");
        return out;
    }

    for tech in technologies {
        out.push_str(&format!(
            "- **[{}]({})**{}",
            tech.name,
            tech.url,
            markdown::beta_badge(tech.beta)
        ));
        if !tech.category.is_empty() {
            out.push_str(&format!(" · {}", tech.category));
        }
        out.push('\n');
        if !tech.description.is_empty() {
            out.push_str(&format!("  {}\n", tech.description));
        }
    }

    out.push('\n');
    let noun = if technologies.len() == 1 {
        "technology"
    } else {
        "technologies"
    };
    out.push_str(&format!("_{} {noun}._\n", technologies.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let technologies = vec![Technology {
            name: "SwiftUI".to_string(),
            url: "https://developer.apple.com/documentation/swiftui".to_string(),
            description: "Declarative UI framework.".to_string(),
            tags: vec!["UI".to_string()],
            languages: vec!["swift".to_string()],
            beta: false,
            category: "App frameworks".to_string(),
        }];
        let out = render(&technologies);
        assert!(out.contains("- **[SwiftUI](https://developer.apple.com/documentation/swiftui)** · App frameworks"));
        assert!(out.contains("  Declarative UI framework."));
        assert!(out.contains("_1 technology._"));
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&[]).contains("No technologies matched"));
    }
}
