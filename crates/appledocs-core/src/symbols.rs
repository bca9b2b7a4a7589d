//! Per-framework symbol listing from the index tree.

use crate::cache::{TTL_INDEX, cache_key};
use crate::client::DocsClient;
use crate::index::{IndexNode, MAX_DEPTH, NodeKind, WildcardPattern, collect, merge_by_path};
use crate::normalize::display_name;
use crate::urls::{Language, framework_index_url, web_url};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upstream index document: one node forest per interface language.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexPayload {
    interface_languages: HashMap<String, Vec<IndexNode>>,
}

impl IndexPayload {
    /// Node forests keyed by interface language ("swift", "occ").
    #[must_use]
    pub const fn interface_languages(&self) -> &HashMap<String, Vec<IndexNode>> {
        &self.interface_languages
    }
}

/// Query parameters for [`list_symbols`].
#[derive(Debug, Clone)]
pub struct SymbolQuery {
    pub framework: String,
    /// Restrict to one symbol kind; `None` means all.
    pub kind: Option<NodeKind>,
    /// Wildcard name pattern (`*` matches any run of characters).
    pub pattern: Option<String>,
    pub language: Language,
    pub limit: usize,
}

/// One symbol entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub url: String,
    pub kind: NodeKind,
    /// Group-marker category the symbol appears under, empty at top level.
    pub category: String,
    pub beta: bool,
    pub deprecated: bool,
}

/// Lists symbols of a framework in index document order.
pub async fn list_symbols(client: &DocsClient, query: &SymbolQuery) -> Result<Vec<Symbol>> {
    let framework = query.framework.trim().to_lowercase();
    if framework.is_empty() {
        return Err(Error::InvalidInput("empty framework name".to_string()));
    }

    let pattern = query
        .pattern
        .as_deref()
        .map(WildcardPattern::compile)
        .transpose()?;

    let limit_s = query.limit.to_string();
    let key = cache_key(
        "symbols",
        &[
            ("framework", Some(framework.as_str())),
            ("type", query.kind.as_ref().map(NodeKind::as_str)),
            ("pattern", query.pattern.as_deref()),
            ("language", Some(query.language.as_param())),
            ("limit", Some(&limit_s)),
        ],
    );

    client
        .cached(&key, TTL_INDEX, || async {
            let url = framework_index_url(&framework);
            let payload: IndexPayload = client.fetcher().fetch_json(&url).await?;
            Ok(collect_symbols(&payload, query, pattern.as_ref()))
        })
        .await
}

fn collect_symbols(
    payload: &IndexPayload,
    query: &SymbolQuery,
    pattern: Option<&WildcardPattern>,
) -> Vec<Symbol> {
    let Some(roots) = payload.interface_languages.get(query.language.as_param()) else {
        return Vec::new();
    };

    let predicate = |node: &IndexNode| {
        if let Some(kind) = &query.kind {
            if node.kind != *kind {
                return false;
            }
        }
        if let Some(pattern) = pattern {
            if !pattern.matches(&node.title) {
                return false;
            }
        }
        true
    };

    let matches = collect(roots, &predicate, query.limit, MAX_DEPTH);
    merge_by_path(matches)
        .into_iter()
        .map(|m| Symbol {
            name: m.title,
            url: web_url(&m.path),
            kind: m.kind,
            category: m.category,
            beta: m.beta,
            deprecated: m.deprecated,
        })
        .collect()
}

/// Canonical display name for a framework slug, for headings.
#[must_use]
pub fn framework_display_name(framework: &str) -> String {
    display_name(framework)
}
