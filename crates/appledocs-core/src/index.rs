//! Index tree parsing and traversal.
//!
//! Framework indexes, the updates index, and parts of the sample catalog all
//! arrive as one upstream shape: a tree of heterogeneous nodes (symbols,
//! articles, sample-code entries, group markers) nested under per-language
//! roots. This module owns the permissive serde model for those trees and
//! the depth-bounded, short-circuiting walker that flattens them into
//! matches.
//!
//! Upstream data is untrusted: missing fields degrade to defaults (empty
//! title, non-beta, unknown kind) rather than failing a whole query over one
//! malformed node.

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Traversal never descends past this many levels from the root call, as a
/// guard against unexpectedly deep or cyclic-looking upstream trees.
pub const MAX_DEPTH: usize = 6;

/// Discriminator for index tree nodes.
///
/// The upstream `type` field is an open string vocabulary; kinds we handle
/// specially get variants, everything else lands in [`NodeKind::Other`] with
/// the raw discriminator preserved. Unknown kinds are ordinary leaves, never
/// group markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Structural heading carrying a category for its siblings below it.
    GroupMarker,
    Module,
    Collection,
    Article,
    SampleCode,
    Overview,
    Class,
    Struct,
    Enum,
    Protocol,
    Method,
    Property,
    Init,
    Func,
    Var,
    Let,
    TypeAlias,
    Case,
    Operator,
    Macro,
    /// Unrecognized discriminator, kept verbatim.
    Other(String),
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "groupMarker" => Self::GroupMarker,
            "module" => Self::Module,
            "collection" => Self::Collection,
            "article" => Self::Article,
            "sampleCode" => Self::SampleCode,
            "overview" => Self::Overview,
            "class" => Self::Class,
            "struct" => Self::Struct,
            "enum" => Self::Enum,
            "protocol" => Self::Protocol,
            "method" => Self::Method,
            "property" => Self::Property,
            "init" => Self::Init,
            "func" => Self::Func,
            "var" => Self::Var,
            "let" => Self::Let,
            "typealias" | "typeAlias" => Self::TypeAlias,
            "case" => Self::Case,
            "op" => Self::Operator,
            "macro" => Self::Macro,
            _ => Self::Other(raw),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl NodeKind {
    /// The upstream string form of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GroupMarker => "groupMarker",
            Self::Module => "module",
            Self::Collection => "collection",
            Self::Article => "article",
            Self::SampleCode => "sampleCode",
            Self::Overview => "overview",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Protocol => "protocol",
            Self::Method => "method",
            Self::Property => "property",
            Self::Init => "init",
            Self::Func => "func",
            Self::Var => "var",
            Self::Let => "let",
            Self::TypeAlias => "typealias",
            Self::Case => "case",
            Self::Operator => "op",
            Self::Macro => "macro",
            Self::Other(raw) => raw,
        }
    }

    /// Structural nodes that carry a category but are never results.
    #[must_use]
    pub const fn is_group_marker(&self) -> bool {
        matches!(self, Self::GroupMarker)
    }
}

/// One node of an upstream index tree.
///
/// A node with no `path` and a default kind exists only to carry `children`
/// and a grouping `title`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexNode {
    pub path: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub children: Vec<IndexNode>,
    pub beta: bool,
    pub external: bool,
    pub deprecated: bool,
}

/// A flattened match produced by the walker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMatch {
    pub path: String,
    pub title: String,
    pub kind: NodeKind,
    pub beta: bool,
    pub deprecated: bool,
    /// Title of the nearest enclosing group marker, empty at top level.
    pub category: String,
    /// Tree level the match was found at, 1-based from the root call.
    pub depth: usize,
    /// Set later by feature modules joining a curated/featured document.
    pub featured: bool,
}

/// A `*`-wildcard title pattern, case-insensitive and anchored at both ends.
pub struct WildcardPattern {
    regex: Regex,
}

impl WildcardPattern {
    /// Compiles a pattern, escaping everything except `*` which matches any
    /// run of characters.
    pub fn compile(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("(?i)^{body}$"))
            .map_err(|e| Error::InvalidInput(format!("bad pattern '{pattern}': {e}")))?;
        Ok(Self { regex })
    }

    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

/// Collects up to `limit` matches from `nodes` in document order.
///
/// Depth-first, pre-order: a node is tested before its children are visited.
/// Traversal short-circuits once `limit` matches are collected and never
/// descends past `max_depth` levels. Group markers are not tested; they set
/// the ambient category for their descendants.
pub fn collect<F>(
    nodes: &[IndexNode],
    predicate: &F,
    limit: usize,
    max_depth: usize,
) -> Vec<IndexMatch>
where
    F: Fn(&IndexNode) -> bool,
{
    let mut out = Vec::new();
    walk(nodes, predicate, limit, max_depth, 1, "", &mut out);
    out
}

fn walk<F>(
    nodes: &[IndexNode],
    predicate: &F,
    limit: usize,
    max_depth: usize,
    depth: usize,
    category: &str,
    out: &mut Vec<IndexMatch>,
) where
    F: Fn(&IndexNode) -> bool,
{
    if depth > max_depth {
        return;
    }

    for node in nodes {
        if out.len() >= limit {
            return;
        }

        if node.kind.is_group_marker() {
            walk(
                &node.children,
                predicate,
                limit,
                max_depth,
                depth + 1,
                &node.title,
                out,
            );
            continue;
        }

        if predicate(node) {
            // Pathless nodes exist only for grouping and cannot be results.
            if let Some(path) = &node.path {
                out.push(IndexMatch {
                    path: path.clone(),
                    title: node.title.clone(),
                    kind: node.kind.clone(),
                    beta: node.beta,
                    deprecated: node.deprecated,
                    category: category.to_string(),
                    depth,
                    featured: false,
                });
                if out.len() >= limit {
                    return;
                }
            }
        }

        walk(
            &node.children,
            predicate,
            limit,
            max_depth,
            depth + 1,
            category,
            out,
        );
    }
}

/// Combines matches that share a `path` into one record, keeping first-seen
/// order.
///
/// Separate per-language subtrees can yield the same node twice; the merge
/// prefers a non-empty category over an empty one, `featured=true` over
/// `false`, `beta=true` over `false`, and the minimum recorded depth.
#[must_use]
pub fn merge_by_path(matches: Vec<IndexMatch>) -> Vec<IndexMatch> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, IndexMatch> = HashMap::new();

    for m in matches {
        if let Some(existing) = merged.get_mut(&m.path) {
            if existing.category.is_empty() && !m.category.is_empty() {
                existing.category = m.category;
            }
            existing.featured |= m.featured;
            existing.beta |= m.beta;
            existing.depth = existing.depth.min(m.depth);
        } else {
            order.push(m.path.clone());
            merged.insert(m.path.clone(), m);
        }
    }

    order.into_iter().filter_map(|p| merged.remove(&p)).collect()
}
