//! Technology catalog listing.

use crate::cache::{TTL_CATALOG, cache_key};
use crate::client::DocsClient;
use crate::urls::{Language, TECHNOLOGIES_URL, identifier_to_url};
use crate::Result;
use serde::{Deserialize, Serialize};

// ---- upstream catalog model (permissive) ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TechnologiesPayload {
    sections: Vec<CatalogSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
    kind: String,
    groups: Vec<CatalogGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogGroup {
    name: String,
    technologies: Vec<CatalogTechnology>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogTechnology {
    title: String,
    tags: Vec<String>,
    languages: Vec<String>,
    beta: bool,
    destination: Destination,
    content: Vec<ContentText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Destination {
    identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ContentText {
    text: String,
}

// ---- output ----

/// One technology entry from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub languages: Vec<String>,
    pub beta: bool,
    /// Catalog group the technology appears under.
    pub category: String,
}

/// Filters for [`list_technologies`], applied in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TechnologyFilters {
    /// Case-insensitive substring match on tags and group name.
    pub category: Option<String>,
    pub language: Option<Language>,
    /// When false, beta technologies are dropped.
    pub include_beta: bool,
    /// 0 means no limit.
    pub limit: usize,
}

/// Lists technologies from the catalog, filtered and sorted alphabetically.
pub async fn list_technologies(
    client: &DocsClient,
    filters: &TechnologyFilters,
) -> Result<Vec<Technology>> {
    let limit_s = filters.limit.to_string();
    let key = cache_key(
        "technologies",
        &[
            ("category", filters.category.as_deref()),
            ("language", filters.language.map(Language::as_param)),
            ("beta", Some(if filters.include_beta { "1" } else { "0" })),
            ("limit", Some(&limit_s)),
        ],
    );

    client
        .cached(&key, TTL_CATALOG, || async {
            let payload: TechnologiesPayload =
                client.fetcher().fetch_json(TECHNOLOGIES_URL).await?;
            Ok(filter_technologies(parse_catalog(&payload), filters))
        })
        .await
}

fn parse_catalog(payload: &TechnologiesPayload) -> Vec<Technology> {
    let mut out = Vec::new();
    for section in &payload.sections {
        if section.kind != "technologies" && !section.kind.is_empty() {
            continue;
        }
        for group in &section.groups {
            for tech in &group.technologies {
                if tech.title.is_empty() {
                    continue;
                }
                let url = identifier_to_url(&tech.destination.identifier).unwrap_or_default();
                out.push(Technology {
                    name: tech.title.clone(),
                    url,
                    description: tech
                        .content
                        .iter()
                        .map(|c| c.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                        .trim()
                        .to_string(),
                    tags: tech.tags.clone(),
                    languages: tech.languages.clone(),
                    beta: tech.beta,
                    category: group.name.clone(),
                });
            }
        }
    }
    out
}

fn filter_technologies(
    mut technologies: Vec<Technology>,
    filters: &TechnologyFilters,
) -> Vec<Technology> {
    if let Some(category) = &filters.category {
        let needle = category.to_lowercase();
        technologies.retain(|t| {
            t.category.to_lowercase().contains(&needle)
                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        });
    }

    if let Some(language) = filters.language {
        let param = language.as_param();
        technologies.retain(|t| t.languages.iter().any(|l| l == param));
    }

    if !filters.include_beta {
        technologies.retain(|t| !t.beta);
    }

    technologies.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if filters.limit > 0 {
        technologies.truncate(filters.limit);
    }
    technologies
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Technology> {
        let payload: TechnologiesPayload = serde_json::from_str(
            r#"{
                "sections": [{
                    "kind": "technologies",
                    "groups": [
                        {"name": "App frameworks", "technologies": [
                            {"title": "SwiftUI", "tags": ["UI"], "languages": ["swift"],
                             "destination": {"identifier": "doc://com.apple.documentation/documentation/swiftui"},
                             "content": [{"text": "Declarative UI framework."}]},
                            {"title": "UIKit", "tags": ["UI"], "languages": ["swift", "occ"],
                             "destination": {"identifier": "doc://com.apple.documentation/documentation/uikit"}}
                        ]},
                        {"name": "Spatial computing", "technologies": [
                            {"title": "visionOS", "tags": ["3D"], "languages": ["swift"], "beta": true,
                             "destination": {"identifier": "doc://com.apple.documentation/documentation/visionos"}}
                        ]}
                    ]
                }]
            }"#,
        )
        .unwrap();
        parse_catalog(&payload)
    }

    #[test]
    fn test_parse_catalog() {
        let techs = fixture();
        assert_eq!(techs.len(), 3);
        assert_eq!(techs[0].name, "SwiftUI");
        assert_eq!(
            techs[0].url,
            "https://developer.apple.com/documentation/swiftui"
        );
        assert_eq!(techs[0].description, "Declarative UI framework.");
        assert_eq!(techs[0].category, "App frameworks");
        assert!(techs[2].beta);
    }

    #[test]
    fn test_category_filter_matches_tags_and_group() {
        let filters = TechnologyFilters {
            category: Some("ui".to_string()),
            include_beta: true,
            ..TechnologyFilters::default()
        };
        let names: Vec<String> = filter_technologies(fixture(), &filters)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["SwiftUI", "UIKit"]);
    }

    #[test]
    fn test_language_filter() {
        let filters = TechnologyFilters {
            language: Some(Language::Occ),
            include_beta: true,
            ..TechnologyFilters::default()
        };
        let techs = filter_technologies(fixture(), &filters);
        assert_eq!(techs.len(), 1);
        assert_eq!(techs[0].name, "UIKit");
    }

    #[test]
    fn test_beta_exclusion_and_limit() {
        let filters = TechnologyFilters {
            include_beta: false,
            limit: 1,
            ..TechnologyFilters::default()
        };
        let techs = filter_technologies(fixture(), &filters);
        assert_eq!(techs.len(), 1);
        // Alphabetical sort puts SwiftUI first; visionOS was dropped as beta.
        assert_eq!(techs[0].name, "SwiftUI");
    }

    #[test]
    fn test_limit_zero_means_unlimited() {
        let filters = TechnologyFilters {
            include_beta: true,
            limit: 0,
            ..TechnologyFilters::default()
        };
        assert_eq!(filter_technologies(fixture(), &filters).len(), 3);
    }
}
