//! Sample code catalog browsing.
//!
//! The sample library document carries every sample as a reference plus a
//! curated "Featured" topic section; featured membership is joined onto the
//! parsed records and sorts them ahead of the alphabetical rest.

use crate::cache::{TTL_CATALOG, cache_key};
use crate::client::DocsClient;
use crate::normalize::display_name;
use crate::urls::{SAMPLES_URL, web_url};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Beta handling for sample listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetaMode {
    Include,
    Exclude,
    Only,
}

impl BetaMode {
    /// Stable string form, used in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Only => "only",
        }
    }
}

// ---- upstream library model (permissive) ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SamplesPayload {
    topic_sections: Vec<LibrarySection>,
    references: HashMap<String, LibraryReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LibrarySection {
    title: String,
    identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LibraryReference {
    title: String,
    url: String,
    role: String,
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

/// One sample-code entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub title: String,
    pub url: String,
    /// Display name of the framework the sample lives under.
    pub framework: String,
    pub description: String,
    pub beta: bool,
    /// Member of the curated "Featured" section.
    pub featured: bool,
}

/// Filters for [`list_samples`], applied in declaration order.
#[derive(Debug, Clone)]
pub struct SampleFilters {
    pub framework: Option<String>,
    pub beta: BetaMode,
    /// Free-text substring over title and description.
    pub search: Option<String>,
    pub limit: usize,
}

impl Default for SampleFilters {
    fn default() -> Self {
        Self {
            framework: None,
            beta: BetaMode::Include,
            search: None,
            limit: 50,
        }
    }
}

/// Lists sample-code projects, featured first then alphabetical.
pub async fn list_samples(client: &DocsClient, filters: &SampleFilters) -> Result<Vec<Sample>> {
    let limit_s = filters.limit.to_string();
    let key = cache_key(
        "samples",
        &[
            ("framework", filters.framework.as_deref()),
            ("beta", Some(filters.beta.as_str())),
            ("search", filters.search.as_deref()),
            ("limit", Some(&limit_s)),
        ],
    );

    client
        .cached(&key, TTL_CATALOG, || async {
            let payload: SamplesPayload = client.fetcher().fetch_json(SAMPLES_URL).await?;
            Ok(filter_samples(parse_library(&payload), filters))
        })
        .await
}

fn parse_library(payload: &SamplesPayload) -> Vec<Sample> {
    let featured: HashSet<&str> = payload
        .topic_sections
        .iter()
        .filter(|s| s.title.to_lowercase().contains("featured"))
        .flat_map(|s| s.identifiers.iter().map(String::as_str))
        .collect();

    let mut out = Vec::new();
    for (identifier, reference) in &payload.references {
        if reference.role != "sampleCode" || reference.title.is_empty() {
            continue;
        }
        out.push(Sample {
            title: reference.title.clone(),
            url: web_url(&reference.url),
            framework: framework_of(&reference.url),
            description: reference
                .abstract_inline
                .iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join("")
                .trim()
                .to_string(),
            beta: reference.beta,
            featured: featured.contains(identifier.as_str()),
        });
    }
    out
}

/// Framework display name from a sample path like
/// `/documentation/swiftui/bringing-robust-navigation`.
fn framework_of(url: &str) -> String {
    url.trim_start_matches('/')
        .split('/')
        .nth(1)
        .map(display_name)
        .unwrap_or_default()
}

fn filter_samples(mut samples: Vec<Sample>, filters: &SampleFilters) -> Vec<Sample> {
    if let Some(framework) = &filters.framework {
        let wanted = display_name(framework).to_lowercase();
        samples.retain(|s| s.framework.to_lowercase() == wanted);
    }

    if let Some(search) = &filters.search {
        let needle = search.to_lowercase();
        samples.retain(|s| {
            s.title.to_lowercase().contains(&needle)
                || s.description.to_lowercase().contains(&needle)
        });
    }

    match filters.beta {
        BetaMode::Include => {},
        BetaMode::Exclude => samples.retain(|s| !s.beta),
        BetaMode::Only => samples.retain(|s| s.beta),
    }

    samples.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });

    if filters.limit > 0 {
        samples.truncate(filters.limit);
    }
    samples
}
