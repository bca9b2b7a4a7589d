//! Documentation updates feed.
//!
//! Two upstream resources are fetched in parallel: the updates feed (the
//! entries themselves) and the updates index tree, whose group markers carry
//! the category each entry belongs to. The categories are joined onto feed
//! records by path.

use crate::cache::{TTL_DOC, cache_key};
use crate::client::DocsClient;
use crate::index::{MAX_DEPTH, collect, merge_by_path};
use crate::normalize::display_name;
use crate::urls::{UPDATES_INDEX_URL, UPDATES_URL, web_url};
use crate::Result;
use crate::symbols::IndexPayload;
use futures::try_join;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Update category, derived from the updates index group markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateCategory {
    Wwdc,
    Technology,
    ReleaseNotes,
}

impl UpdateCategory {
    fn from_group_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("wwdc") {
            Self::Wwdc
        } else if lower.contains("release") {
            Self::ReleaseNotes
        } else {
            Self::Technology
        }
    }
}

// ---- upstream feed model (permissive) ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatesPayload {
    topic_sections: Vec<FeedSection>,
    references: HashMap<String, FeedReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FeedSection {
    title: String,
    identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FeedReference {
    title: String,
    url: String,
    #[serde(rename = "abstract")]
    abstract_inline: Vec<Inline>,
    beta: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Inline {
    text: String,
}

// ---- output ----

/// One update entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: UpdateCategory,
    /// Year token extracted from the title, when present.
    pub year: Option<u16>,
    pub beta: bool,
}

/// Filters for [`list_updates`], applied in declaration order.
#[derive(Debug, Clone, Default)]
pub struct UpdateFilters {
    pub category: Option<UpdateCategory>,
    /// Technology name, matched case-insensitively against title and URL.
    pub technology: Option<String>,
    pub year: Option<u16>,
    /// Free-text substring over title and description.
    pub search: Option<String>,
    pub include_beta: bool,
    pub limit: usize,
}

/// Lists documentation updates, newest year first.
pub async fn list_updates(client: &DocsClient, filters: &UpdateFilters) -> Result<Vec<UpdateEntry>> {
    let year_s = filters.year.map(|y| y.to_string());
    let limit_s = filters.limit.to_string();
    let key = cache_key(
        "updates",
        &[
            (
                "category",
                filters.category.map(|c| match c {
                    UpdateCategory::Wwdc => "wwdc",
                    UpdateCategory::Technology => "technology",
                    UpdateCategory::ReleaseNotes => "release-notes",
                }),
            ),
            ("technology", filters.technology.as_deref()),
            ("year", year_s.as_deref()),
            ("search", filters.search.as_deref()),
            ("beta", Some(if filters.include_beta { "1" } else { "0" })),
            ("limit", Some(&limit_s)),
        ],
    );

    client
        .cached(&key, TTL_DOC, || async {
            let (feed, index): (UpdatesPayload, IndexPayload) = try_join!(
                client.fetcher().fetch_json(UPDATES_URL),
                client.fetcher().fetch_json(UPDATES_INDEX_URL),
            )?;

            let categories = category_map(&index);
            Ok(filter_updates(parse_feed(&feed, &categories), filters))
        })
        .await
}

/// Path -> category, merged across every language entry point of the index.
fn category_map(index: &IndexPayload) -> HashMap<String, UpdateCategory> {
    let mut matches = Vec::new();
    for roots in index.interface_languages().values() {
        matches.extend(collect(roots, &|n| n.path.is_some(), usize::MAX, MAX_DEPTH));
    }

    merge_by_path(matches)
        .into_iter()
        .map(|m| {
            (
                m.path.to_lowercase(),
                UpdateCategory::from_group_title(&m.category),
            )
        })
        .collect()
}

fn parse_feed(
    feed: &UpdatesPayload,
    categories: &HashMap<String, UpdateCategory>,
) -> Vec<UpdateEntry> {
    let mut out = Vec::new();
    for section in &feed.topic_sections {
        for identifier in &section.identifiers {
            let Some(reference) = feed.references.get(identifier) else {
                continue;
            };
            if reference.title.is_empty() || reference.url.is_empty() {
                continue;
            }

            let category = categories
                .get(&reference.url.to_lowercase())
                .copied()
                .unwrap_or_else(|| UpdateCategory::from_group_title(&section.title));

            out.push(UpdateEntry {
                title: reference.title.clone(),
                url: web_url(&reference.url),
                description: reference
                    .abstract_inline
                    .iter()
                    .map(|i| i.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
                    .trim()
                    .to_string(),
                category,
                year: extract_year(&reference.title),
                beta: reference.beta,
            });
        }
    }
    out
}

static YEAR_4: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b(20\d{2})\b").unwrap()
});
static WWDC_2: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)wwdc\s*'?(\d{2})\b").unwrap()
});

/// Extracts a year token from an update title ("WWDC 2022", "WWDC24",
/// "WWDC '23").
fn extract_year(title: &str) -> Option<u16> {
    if let Some(caps) = YEAR_4.captures(title) {
        return caps.get(1)?.as_str().parse().ok();
    }
    if let Some(caps) = WWDC_2.captures(title) {
        let short: u16 = caps.get(1)?.as_str().parse().ok()?;
        return Some(2000 + short);
    }
    None
}

fn filter_updates(mut updates: Vec<UpdateEntry>, filters: &UpdateFilters) -> Vec<UpdateEntry> {
    if let Some(category) = filters.category {
        updates.retain(|u| u.category == category);
    }

    if let Some(technology) = &filters.technology {
        let needle = display_name(technology).to_lowercase();
        updates.retain(|u| {
            u.title.to_lowercase().contains(&needle) || u.url.to_lowercase().contains(&needle)
        });
    }

    if let Some(year) = filters.year {
        updates.retain(|u| u.year == Some(year));
    }

    if let Some(search) = &filters.search {
        let needle = search.to_lowercase();
        updates.retain(|u| {
            u.title.to_lowercase().contains(&needle)
                || u.description.to_lowercase().contains(&needle)
        });
    }

    if !filters.include_beta {
        updates.retain(|u| !u.beta);
    }

    // Newest year first; entries without a year sink to the end. The sort is
    // stable, so document order is preserved within a year.
    updates.sort_by_key(|u| std::cmp::Reverse(u.year.unwrap_or(0)));

    if filters.limit > 0 {
        updates.truncate(filters.limit);
    }
    updates
}
