//! # appledocs-core
//!
//! Core functionality for appledocs - a CLI that queries the Apple Developer
//! documentation site's public JSON and HTML endpoints and reshapes the
//! results for terminal consumption.
//!
//! ## Architecture
//!
//! The crate is organized around a small retrieval-and-normalization
//! pipeline shared by every query:
//!
//! - **Fetcher**: HTTP with timeout, retry/backoff, and randomized client
//!   identification
//! - **Cache**: an in-process TTL map so repeated queries within one run
//!   skip the network
//! - **Index walker**: depth-bounded traversal over upstream index trees
//! - **Feature modules**: one per query shape (search, doc, technologies,
//!   symbols, updates, samples), each composing the pieces above
//!
//! Upstream data is treated as untrusted: missing or malformed fields
//! degrade to defaults, and no query fails over a single bad record.

/// TTL response cache and deterministic cache keys
pub mod cache;
/// Shared fetcher+cache handle passed into feature calls
pub mod client;
/// Single documentation page retrieval with disambiguation following
pub mod doc;
/// Error types and result alias
pub mod error;
/// HTTP fetching with retry and backoff
pub mod fetcher;
/// Index tree model and depth-bounded walker
pub mod index;
/// Canonical display names for framework slugs
pub mod normalize;
/// Sample code catalog browsing
pub mod samples;
/// Full-text search over the documentation site
pub mod search;
/// Per-framework symbol listing
pub mod symbols;
/// Technology catalog listing
pub mod technologies;
/// Documentation updates feed
pub mod updates;
/// URL construction and rewrite rules
pub mod urls;

pub use cache::{ResponseCache, cache_key};
pub use client::DocsClient;
pub use doc::{DocOptions, DocResult};
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use index::{IndexMatch, IndexNode, NodeKind, WildcardPattern};
pub use normalize::display_name;
pub use samples::{BetaMode, Sample, SampleFilters};
pub use search::{HitKind, SearchHit, SearchScope};
pub use symbols::{Symbol, SymbolQuery};
pub use technologies::{Technology, TechnologyFilters};
pub use updates::{UpdateCategory, UpdateEntry, UpdateFilters};
pub use urls::Language;
