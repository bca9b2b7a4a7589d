//! Full-text search against the documentation site's HTML results page.
//!
//! Search has no JSON endpoint, so this module is a thin adapter over the
//! result page markup. The markup is treated as untrusted: if the result
//! list cannot be located the parse degrades to an empty set with a warning
//! rather than failing the command.

use crate::cache::{TTL_DOC, cache_key};
use crate::client::DocsClient;
use crate::urls::{BASE_URL, search_url};
use crate::{Error, Result};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Result type restriction for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchScope {
    All,
    Documentation,
    Sample,
}

impl SearchScope {
    /// Value of the upstream `type` query parameter, when restricted.
    #[must_use]
    pub const fn as_upstream_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Documentation => Some("Documentation"),
            Self::Sample => Some("Sample Code"),
        }
    }
}

/// Kind of an individual search hit, derived from its markup and URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Documentation,
    SampleCode,
    General,
}

/// One search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub description: String,
    pub kind: HitKind,
}

/// Searches the documentation site, returning at most `limit` hits.
pub async fn search(
    client: &DocsClient,
    query: &str,
    scope: SearchScope,
    limit: usize,
) -> Result<Vec<SearchHit>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("empty search query".to_string()));
    }

    let limit_s = limit.to_string();
    let key = cache_key(
        "search",
        &[
            ("query", Some(query)),
            ("type", scope.as_upstream_param()),
            ("limit", Some(&limit_s)),
        ],
    );

    client
        .cached(&key, TTL_DOC, || async {
            let url = search_url(query, scope.as_upstream_param());
            let html = client.fetcher().fetch_text(&url).await?;
            let mut hits = parse_search_html(&html);
            apply_scope(&mut hits, scope);
            hits.truncate(limit);
            Ok(hits)
        })
        .await
}

fn apply_scope(hits: &mut Vec<SearchHit>, scope: SearchScope) {
    match scope {
        SearchScope::All => {},
        SearchScope::Documentation => {
            hits.retain(|h| h.kind == HitKind::Documentation && h.url.contains("/documentation/"));
        },
        SearchScope::Sample => hits.retain(|h| h.kind == HitKind::SampleCode),
    }
}

/// Extracts hits from the search results page.
///
/// Kept synchronous and free of awaits so the parsed DOM never has to cross
/// a suspension point.
fn parse_search_html(html: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);

    // The result list has been stable under these class names; anything else
    // means the markup changed and we degrade to no results.
    let Ok(result_sel) = Selector::parse("li.search-result") else {
        return Vec::new();
    };
    let Ok(link_sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let Ok(description_sel) = Selector::parse("p.result-description, .description") else {
        return Vec::new();
    };

    let base = Url::parse(BASE_URL).ok();
    let mut hits = Vec::new();

    for item in document.select(&result_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let url = match &base {
            Some(base) => match base.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(_) => continue,
            },
            None => href.to_string(),
        };

        let title = text_of(&link);
        if title.is_empty() {
            continue;
        }

        let description = item
            .select(&description_sel)
            .next()
            .map(|d| text_of(&d))
            .unwrap_or_default();

        let classes = item.value().attr("class").unwrap_or_default();
        let kind = if classes.contains("sample") {
            HitKind::SampleCode
        } else if url.contains("/documentation/") {
            HitKind::Documentation
        } else {
            HitKind::General
        };

        hits.push(SearchHit {
            title,
            url,
            description,
            kind,
        });
    }

    if hits.is_empty() {
        warn!("no results parsed from search page; markup may have changed");
    }
    hits
}

fn text_of(element: &scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
