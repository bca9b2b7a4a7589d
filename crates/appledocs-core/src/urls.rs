//! URL construction and rewrite rules for the Apple Developer site.
//!
//! Every browsable documentation page has a JSON twin under
//! `/tutorials/data/`; indexes live under `/tutorials/data/index/`. The
//! rewrite rules here are the only place those conventions are spelled out.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

/// Origin for all upstream requests.
pub const BASE_URL: &str = "https://developer.apple.com";

/// Technologies catalog JSON.
pub const TECHNOLOGIES_URL: &str =
    "https://developer.apple.com/tutorials/data/documentation/technologies.json";

/// Documentation updates feed JSON.
pub const UPDATES_URL: &str =
    "https://developer.apple.com/tutorials/data/documentation/updates.json";

/// Updates index tree (categories per update path).
pub const UPDATES_INDEX_URL: &str = "https://developer.apple.com/tutorials/data/index/updates";

/// Sample code library JSON.
pub const SAMPLES_URL: &str =
    "https://developer.apple.com/tutorials/data/documentation/samplecode.json";

/// Source language for symbol indexes and docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Swift,
    /// Objective-C ("occ" in upstream data).
    Occ,
}

impl Language {
    /// The upstream identifier for this language.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Swift => "swift",
            Self::Occ => "occ",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Swift => write!(f, "Swift"),
            Self::Occ => write!(f, "Objective-C"),
        }
    }
}

/// Rewrites a documentation page URL or path to its JSON data URL under
/// `base`.
///
/// Accepts a full `https://developer.apple.com/documentation/...` URL or a
/// bare `/documentation/...` path. Anything off-host, off-scheme, or outside
/// the documentation section is rejected before any network call. Production
/// callers pass [`BASE_URL`]; taking the origin as a parameter lets the doc
/// resolution loop run against a local server.
pub fn doc_data_url(base: &str, input: &str) -> Result<String> {
    let path = doc_path(input)?;
    Ok(format!("{base}/tutorials/data{path}.json"))
}

/// Normalizes a documentation URL or path to its canonical `/documentation/...`
/// path: lowercase host rules applied, query/fragment dropped, no trailing
/// slash.
pub fn doc_path(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "empty documentation URL".to_string(),
        ));
    }

    let path = if trimmed.contains("://") {
        let parsed = Url::parse(trimmed)
            .map_err(|e| Error::InvalidInput(format!("'{trimmed}' is not a valid URL: {e}")))?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(Error::InvalidInput(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str() != Some("developer.apple.com") {
            return Err(Error::InvalidInput(format!(
                "'{trimmed}' is not a developer.apple.com URL"
            )));
        }
        parsed.path().to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    let path = path.trim_end_matches('/');
    if !path.starts_with("/documentation/") && !path.starts_with("/tutorials/") {
        return Err(Error::InvalidInput(format!(
            "'{input}' does not point at Apple documentation"
        )));
    }

    Ok(path.to_string())
}

/// Resolves an opaque upstream identifier to a browsable URL.
///
/// Identifiers look like `doc://com.apple.documentation/documentation/swiftui/view`;
/// the bundle authority varies by framework, the path is what matters.
#[must_use]
pub fn identifier_to_url(identifier: &str) -> Option<String> {
    let rest = identifier.strip_prefix("doc://")?;
    let slash = rest.find('/')?;
    let path = &rest[slash..];
    if !path.starts_with("/documentation/") && !path.starts_with("/tutorials/") {
        return None;
    }
    Some(format!("{BASE_URL}{path}"))
}

/// Browsable URL for an index path.
#[must_use]
pub fn web_url(path: &str) -> String {
    if path.starts_with('/') {
        format!("{BASE_URL}{path}")
    } else {
        format!("{BASE_URL}/{path}")
    }
}

/// Index tree URL for a framework slug.
#[must_use]
pub fn framework_index_url(framework: &str) -> String {
    format!(
        "{BASE_URL}/tutorials/data/index/{}",
        framework.trim().to_lowercase()
    )
}

/// Parsed form of [`BASE_URL`], established once at first use.
static BASE: Lazy<Url> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Url::parse(BASE_URL).unwrap()
});

/// Search results page for a query, optionally restricted to one result type.
#[must_use]
pub fn search_url(query: &str, result_type: Option<&str>) -> String {
    let mut url = BASE.clone();
    url.set_path("/search/");
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", query);
        if let Some(t) = result_type {
            pairs.append_pair("type", t);
        }
    }
    url.to_string()
}
