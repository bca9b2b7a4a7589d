//! Single documentation page retrieval.
//!
//! Fetches the JSON twin of a documentation page and flattens it into a
//! [`DocResult`]. Upstream page JSON is deeply nested and loosely shaped;
//! the serde models here default every field so a missing section degrades
//! to an empty one instead of failing the page.
//!
//! Some pages are pure disambiguation stubs: no abstract, no content, just
//! cross-references. For those the module transparently follows the first
//! cross-reference, up to [`MAX_REDIRECT_HOPS`] hops, as if the user had
//! requested it directly.

use crate::cache::{TTL_DOC, cache_key};
use crate::client::DocsClient;
use crate::fetcher::Fetcher;
use crate::urls::{BASE_URL, doc_data_url, doc_path, identifier_to_url, web_url};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Disambiguation pages are followed at most this many times.
const MAX_REDIRECT_HOPS: u8 = 2;

/// Optional sections to include in a [`DocResult`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DocOptions {
    /// Include relationship sections (inherits from, conforms to, ...).
    pub related: bool,
    /// Include the full referenced-pages list.
    pub references: bool,
    /// Include "see also" sections.
    pub similar: bool,
    /// Include per-platform availability detail.
    pub platform: bool,
}

// ---- upstream page model (permissive) ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocPage {
    metadata: Metadata,
    #[serde(rename = "abstract")]
    abstract_inline: Vec<Inline>,
    primary_content_sections: Vec<ContentSection>,
    topic_sections: Vec<TopicSection>,
    relationships_sections: Vec<RelationshipSection>,
    see_also_sections: Vec<TopicSection>,
    references: HashMap<String, Reference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Metadata {
    title: String,
    role_heading: String,
    symbol_kind: String,
    platforms: Vec<PlatformInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformInfo {
    pub name: String,
    pub introduced_at: String,
    pub deprecated_at: Option<String>,
    pub beta: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Inline {
    text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContentSection {
    kind: String,
    declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Declaration {
    tokens: Vec<Inline>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TopicSection {
    title: String,
    identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RelationshipSection {
    #[serde(rename = "type")]
    relation: String,
    title: String,
    identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Reference {
    title: String,
    url: String,
    #[serde(rename = "abstract")]
    abstract_inline: Vec<Inline>,
    beta: bool,
}

// ---- flattened output ----

/// Cross-referenced page link in a [`DocResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocLink {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub beta: bool,
}

/// Named group of links (a topic, relationship, or see-also section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGroup {
    pub title: String,
    pub entries: Vec<DocLink>,
}

/// Flattened view of one documentation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocResult {
    pub title: String,
    pub url: String,
    pub kind: String,
    pub summary: String,
    pub declaration: Option<String>,
    pub beta: bool,
    pub platforms: Vec<PlatformInfo>,
    pub topics: Vec<LinkGroup>,
    pub relationships: Vec<LinkGroup>,
    pub see_also: Vec<LinkGroup>,
    pub references: Vec<DocLink>,
    /// Number of disambiguation hops followed to reach this page.
    pub hops: u8,
}

/// Fetches one documentation page, following disambiguation stubs.
pub async fn fetch_doc(client: &DocsClient, input: &str, options: DocOptions) -> Result<DocResult> {
    let path = doc_path(input)?;

    let key = cache_key(
        "doc",
        &[
            ("url", Some(path.as_str())),
            ("related", options.related.then_some("1")),
            ("references", options.references.then_some("1")),
            ("similar", options.similar.then_some("1")),
            ("platform", options.platform.then_some("1")),
        ],
    );

    client
        .cached(&key, TTL_DOC, || async move {
            resolve_doc(client.fetcher(), BASE_URL, path, options).await
        })
        .await
}

/// Fetches the page at `path` from `base`, following disambiguation stubs up
/// to [`MAX_REDIRECT_HOPS`] times. A stub reached at the hop cap is rendered
/// as-is.
async fn resolve_doc(
    fetcher: &Fetcher,
    base: &str,
    path: String,
    options: DocOptions,
) -> Result<DocResult> {
    let mut current = path;
    let mut hops: u8 = 0;

    loop {
        let data_url = doc_data_url(base, &current)?;
        let page: DocPage = fetcher.fetch_json(&data_url).await?;

        if let Some(next) = redirect_target(&page) {
            if hops < MAX_REDIRECT_HOPS {
                debug!(from = %current, to = %next, "following disambiguation page");
                current = doc_path(&next)?;
                hops += 1;
                continue;
            }
        }

        return Ok(build_result(&page, &current, options, hops));
    }
}

/// A page with no content of its own redirects to its first cross-reference.
fn redirect_target(page: &DocPage) -> Option<String> {
    let has_content = !page.abstract_inline.is_empty()
        || !page.primary_content_sections.is_empty()
        || !page.topic_sections.is_empty();
    if has_content {
        return None;
    }

    page.references
        .values()
        .filter(|r| r.url.starts_with("/documentation/"))
        .map(|r| r.url.clone())
        .min() // deterministic "first" over an unordered map
}

fn build_result(page: &DocPage, path: &str, options: DocOptions, hops: u8) -> DocResult {
    let resolve = |identifiers: &[String]| -> Vec<DocLink> {
        identifiers
            .iter()
            .filter_map(|id| link_for(page, id))
            .collect()
    };

    let topics = page
        .topic_sections
        .iter()
        .map(|s| LinkGroup {
            title: s.title.clone(),
            entries: resolve(&s.identifiers),
        })
        .filter(|g| !g.entries.is_empty())
        .collect();

    let relationships = if options.related {
        page.relationships_sections
            .iter()
            .map(|s| LinkGroup {
                title: if s.title.is_empty() {
                    s.relation.clone()
                } else {
                    s.title.clone()
                },
                entries: resolve(&s.identifiers),
            })
            .filter(|g| !g.entries.is_empty())
            .collect()
    } else {
        Vec::new()
    };

    let see_also = if options.similar {
        page.see_also_sections
            .iter()
            .map(|s| LinkGroup {
                title: s.title.clone(),
                entries: resolve(&s.identifiers),
            })
            .filter(|g| !g.entries.is_empty())
            .collect()
    } else {
        Vec::new()
    };

    let references = if options.references {
        let mut refs: Vec<DocLink> = page
            .references
            .keys()
            .filter_map(|id| link_for(page, id))
            .collect();
        refs.sort_by(|a, b| a.title.cmp(&b.title));
        refs
    } else {
        Vec::new()
    };

    let platforms = if options.platform {
        page.metadata.platforms.clone()
    } else {
        Vec::new()
    };

    let kind = if page.metadata.role_heading.is_empty() {
        page.metadata.symbol_kind.clone()
    } else {
        page.metadata.role_heading.clone()
    };

    DocResult {
        title: page.metadata.title.clone(),
        url: web_url(path),
        kind,
        summary: inline_text(&page.abstract_inline),
        declaration: declaration_text(page),
        beta: page.metadata.platforms.iter().any(|p| p.beta),
        platforms,
        topics,
        relationships,
        see_also,
        references,
        hops,
    }
}

fn link_for(page: &DocPage, identifier: &str) -> Option<DocLink> {
    let reference = page.references.get(identifier)?;
    let url = if reference.url.starts_with('/') {
        web_url(&reference.url)
    } else if reference.url.is_empty() {
        identifier_to_url(identifier)?
    } else {
        reference.url.clone()
    };
    Some(DocLink {
        title: reference.title.clone(),
        url,
        summary: inline_text(&reference.abstract_inline),
        beta: reference.beta,
    })
}

fn inline_text(inline: &[Inline]) -> String {
    inline
        .iter()
        .map(|i| i.text.as_str())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}

fn declaration_text(page: &DocPage) -> Option<String> {
    page.primary_content_sections
        .iter()
        .find(|s| s.kind == "declarations")
        .and_then(|s| s.declarations.first())
        .map(|d| inline_text(&d.tokens))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_fetcher() -> Fetcher {
        Fetcher::with_config(Duration::from_secs(5), Duration::from_millis(10)).unwrap()
    }

    /// A disambiguation stub: no content of its own, one cross-reference.
    fn stub_body(title: &str, target: &str) -> String {
        format!(
            r#"{{
                "metadata": {{"title": "{title}"}},
                "references": {{
                    "doc://x{target}": {{"title": "next", "url": "{target}"}}
                }}
            }}"#
        )
    }

    async fn mount_page(server: &MockServer, page_path: &str, body: String) {
        Mock::given(method("GET"))
            .and(url_path(format!("/tutorials/data{page_path}.json")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body, "application/json"),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_two_stub_hops_land_on_content() {
        let server = MockServer::start().await;

        mount_page(
            &server,
            "/documentation/swiftui/a",
            stub_body("A", "/documentation/swiftui/b"),
        )
        .await;
        mount_page(
            &server,
            "/documentation/swiftui/b",
            stub_body("B", "/documentation/swiftui/c"),
        )
        .await;
        mount_page(
            &server,
            "/documentation/swiftui/c",
            r#"{
                "metadata": {"title": "Target", "roleHeading": "Structure"},
                "abstract": [{"text": "The real page."}]
            }"#
            .to_string(),
        )
        .await;

        let result = resolve_doc(
            &fast_fetcher(),
            &server.uri(),
            "/documentation/swiftui/a".to_string(),
            DocOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.title, "Target");
        assert_eq!(result.hops, 2);
        assert_eq!(
            result.url,
            "https://developer.apple.com/documentation/swiftui/c"
        );
    }

    #[tokio::test]
    async fn test_stub_reached_at_hop_cap_is_rendered_as_is() {
        let server = MockServer::start().await;

        mount_page(
            &server,
            "/documentation/swiftui/a",
            stub_body("A", "/documentation/swiftui/b"),
        )
        .await;
        mount_page(
            &server,
            "/documentation/swiftui/b",
            stub_body("B", "/documentation/swiftui/c"),
        )
        .await;
        // Still a stub, but the hop budget is spent here. No mock exists for
        // its target, so following it would fail the test.
        mount_page(
            &server,
            "/documentation/swiftui/c",
            stub_body("C", "/documentation/swiftui/d"),
        )
        .await;

        let result = resolve_doc(
            &fast_fetcher(),
            &server.uri(),
            "/documentation/swiftui/a".to_string(),
            DocOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.title, "C");
        assert_eq!(result.hops, 2);
    }

    fn view_page() -> DocPage {
        serde_json::from_str(
            r#"{
                "metadata": {
                    "title": "View",
                    "roleHeading": "Protocol",
                    "platforms": [
                        {"name": "iOS", "introducedAt": "13.0", "beta": false},
                        {"name": "visionOS", "introducedAt": "1.0", "beta": true}
                    ]
                },
                "abstract": [{"type": "text", "text": "A type that represents part of your app's user interface."}],
                "primaryContentSections": [
                    {"kind": "declarations", "declarations": [
                        {"tokens": [{"text": "protocol "}, {"text": "View"}]}
                    ]}
                ],
                "topicSections": [
                    {"title": "Implementing a custom view", "identifiers": [
                        "doc://com.apple.SwiftUI/documentation/swiftui/view/body"
                    ]}
                ],
                "seeAlsoSections": [
                    {"title": "View fundamentals", "identifiers": [
                        "doc://com.apple.SwiftUI/documentation/swiftui/viewbuilder"
                    ]}
                ],
                "references": {
                    "doc://com.apple.SwiftUI/documentation/swiftui/view/body": {
                        "title": "body",
                        "url": "/documentation/swiftui/view/body",
                        "abstract": [{"text": "The content and behavior of the view."}]
                    },
                    "doc://com.apple.SwiftUI/documentation/swiftui/viewbuilder": {
                        "title": "ViewBuilder",
                        "url": "/documentation/swiftui/viewbuilder",
                        "beta": false
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_result_basic() {
        let page = view_page();
        let result = build_result(
            &page,
            "/documentation/swiftui/view",
            DocOptions::default(),
            0,
        );

        assert_eq!(result.title, "View");
        assert_eq!(result.kind, "Protocol");
        assert_eq!(
            result.url,
            "https://developer.apple.com/documentation/swiftui/view"
        );
        assert_eq!(result.declaration.as_deref(), Some("protocol View"));
        assert!(result.summary.contains("user interface"));
        assert!(result.beta, "visionOS availability is beta");

        assert_eq!(result.topics.len(), 1);
        assert_eq!(result.topics[0].entries[0].title, "body");
        assert_eq!(
            result.topics[0].entries[0].url,
            "https://developer.apple.com/documentation/swiftui/view/body"
        );

        // Optional sections stay empty unless requested.
        assert!(result.see_also.is_empty());
        assert!(result.references.is_empty());
        assert!(result.platforms.is_empty());
    }

    #[test]
    fn test_optional_sections_enabled() {
        let page = view_page();
        let options = DocOptions {
            similar: true,
            references: true,
            platform: true,
            related: true,
        };
        let result = build_result(&page, "/documentation/swiftui/view", options, 0);

        assert_eq!(result.see_also.len(), 1);
        assert_eq!(result.see_also[0].title, "View fundamentals");
        assert_eq!(result.references.len(), 2);
        assert_eq!(result.platforms.len(), 2);
        // Page has no relationship sections; requested but absent means empty.
        assert!(result.relationships.is_empty());
    }

    #[test]
    fn test_redirect_target_on_stub_page() {
        let stub: DocPage = serde_json::from_str(
            r#"{
                "metadata": {"title": "NavigationView"},
                "references": {
                    "doc://x/documentation/swiftui/navigationstack": {
                        "title": "NavigationStack",
                        "url": "/documentation/swiftui/navigationstack"
                    },
                    "doc://x/videos/wwdc": {
                        "title": "WWDC video",
                        "url": "https://developer.apple.com/videos/play/wwdc2022/10054/"
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            redirect_target(&stub).as_deref(),
            Some("/documentation/swiftui/navigationstack")
        );
    }

    #[test]
    fn test_no_redirect_when_page_has_content() {
        assert_eq!(redirect_target(&view_page()), None);
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let page: DocPage = serde_json::from_str("{}").unwrap();
        let result = build_result(&page, "/documentation/swiftui", DocOptions::default(), 0);

        assert_eq!(result.title, "");
        assert_eq!(result.summary, "");
        assert_eq!(result.declaration, None);
        assert!(!result.beta);
        assert!(result.topics.is_empty());
    }
}
