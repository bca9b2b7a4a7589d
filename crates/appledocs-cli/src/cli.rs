//! CLI structure and argument parsing.
//!
//! Six query subcommands plus shell completion generation. Flag names and
//! defaults are a compatibility contract; changing them breaks scripts.
//!
//! ```bash
//! appledocs search "navigation stack" --type documentation
//! appledocs doc https://developer.apple.com/documentation/swiftui/view --similar
//! appledocs symbols swiftui --type struct --pattern '*View'
//! appledocs updates --category wwdc --year 2024
//! appledocs samples --framework swiftdata --beta only
//! ```

use appledocs_core::{BetaMode, Language, NodeKind, SearchScope, UpdateCategory};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Top-level CLI for the `appledocs` command.
#[derive(Parser, Debug)]
#[command(name = "appledocs")]
#[command(version)]
#[command(about = "Query Apple Developer documentation from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the documentation site
    Search {
        /// Search query
        query: String,

        /// Restrict results to one kind
        #[arg(long = "type", value_enum, default_value_t = SearchTypeArg::All)]
        result_type: SearchTypeArg,

        /// Maximum number of results
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: u32,
    },

    /// Show one documentation page
    Doc {
        /// Page URL (https://developer.apple.com/documentation/...) or /documentation/ path
        url: String,

        /// Include relationship sections (inherits from, conforms to, ...)
        #[arg(long)]
        related: bool,

        /// Include the full referenced-pages list
        #[arg(long)]
        references: bool,

        /// Include "see also" sections
        #[arg(long)]
        similar: bool,

        /// Include per-platform availability detail
        #[arg(long)]
        platform: bool,
    },

    /// List technologies from the catalog
    Technologies {
        /// Filter by category or tag substring
        #[arg(long)]
        category: Option<String>,

        /// Filter by source language
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,

        /// Include beta technologies
        #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
        beta: bool,

        /// Maximum number of results (0 = no limit)
        #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(0..=500))]
        limit: u32,
    },

    /// List symbols of a framework
    Symbols {
        /// Framework name (e.g. swiftui, uikit)
        framework: String,

        /// Restrict to one symbol kind
        #[arg(long = "type", value_enum, default_value_t = SymbolTypeArg::All)]
        symbol_type: SymbolTypeArg,

        /// Wildcard name pattern, `*` matches any run of characters
        #[arg(long)]
        pattern: Option<String>,

        /// Source language of the symbol index
        #[arg(long, value_enum, default_value_t = LanguageArg::Swift)]
        language: LanguageArg,

        /// Maximum number of results
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: u32,
    },

    /// List documentation updates
    Updates {
        /// Restrict to one update category
        #[arg(long, value_enum, default_value_t = UpdateCategoryArg::All)]
        category: UpdateCategoryArg,

        /// Filter by technology name
        #[arg(long)]
        technology: Option<String>,

        /// Filter by year
        #[arg(long)]
        year: Option<u16>,

        /// Free-text filter over title and description
        #[arg(long)]
        search: Option<String>,

        /// Include beta updates
        #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
        beta: bool,

        /// Maximum number of results
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: u32,
    },

    /// Browse the sample code library
    Samples {
        /// Filter by framework name
        #[arg(long)]
        framework: Option<String>,

        /// Beta handling
        #[arg(long, value_enum, default_value_t = BetaModeArg::Include)]
        beta: BetaModeArg,

        /// Free-text filter over title and description
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: u32,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTypeArg {
    All,
    Documentation,
    Sample,
}

impl From<SearchTypeArg> for SearchScope {
    fn from(arg: SearchTypeArg) -> Self {
        match arg {
            SearchTypeArg::All => Self::All,
            SearchTypeArg::Documentation => Self::Documentation,
            SearchTypeArg::Sample => Self::Sample,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageArg {
    Swift,
    Occ,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Swift => Self::Swift,
            LanguageArg::Occ => Self::Occ,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolTypeArg {
    All,
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
    Typealias,
}

impl SymbolTypeArg {
    /// Core node kind for this restriction; `None` means all kinds.
    #[must_use]
    pub fn as_node_kind(self) -> Option<NodeKind> {
        match self {
            Self::All => None,
            Self::Class => Some(NodeKind::Class),
            Self::Struct => Some(NodeKind::Struct),
            Self::Enum => Some(NodeKind::Enum),
            Self::Protocol => Some(NodeKind::Protocol),
            Self::Method => Some(NodeKind::Method),
            Self::Property => Some(NodeKind::Property),
            Self::Init => Some(NodeKind::Init),
            Self::Func => Some(NodeKind::Func),
            Self::Var => Some(NodeKind::Var),
            Self::Let => Some(NodeKind::Let),
            Self::Typealias => Some(NodeKind::TypeAlias),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCategoryArg {
    All,
    Wwdc,
    Technology,
    ReleaseNotes,
}

impl UpdateCategoryArg {
    /// Core category for this restriction; `None` means all.
    #[must_use]
    pub fn as_category(self) -> Option<UpdateCategory> {
        match self {
            Self::All => None,
            Self::Wwdc => Some(UpdateCategory::Wwdc),
            Self::Technology => Some(UpdateCategory::Technology),
            Self::ReleaseNotes => Some(UpdateCategory::ReleaseNotes),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaModeArg {
    Include,
    Exclude,
    Only,
}

impl From<BetaModeArg> for BetaMode {
    fn from(arg: BetaModeArg) -> Self {
        match arg {
            BetaModeArg::Include => Self::Include,
            BetaModeArg::Exclude => Self::Exclude,
            BetaModeArg::Only => Self::Only,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["appledocs", "search", "navigation stack"]).unwrap();
        match cli.command {
            Commands::Search {
                query,
                result_type,
                limit,
            } => {
                assert_eq!(query, "navigation stack");
                assert_eq!(result_type, SearchTypeArg::All);
                assert_eq!(limit, 50);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_limit_range_enforced() {
        assert!(Cli::try_parse_from(["appledocs", "search", "x", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["appledocs", "search", "x", "--limit", "201"]).is_err());
        assert!(Cli::try_parse_from(["appledocs", "search", "x", "--limit", "200"]).is_ok());
    }

    #[test]
    fn test_beta_bool_flag_takes_value() {
        let cli =
            Cli::try_parse_from(["appledocs", "technologies", "--beta", "false"]).unwrap();
        match cli.command {
            Commands::Technologies { beta, limit, .. } => {
                assert!(!beta);
                assert_eq!(limit, 200);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_update_category_kebab_case() {
        let cli =
            Cli::try_parse_from(["appledocs", "updates", "--category", "release-notes"]).unwrap();
        match cli.command {
            Commands::Updates { category, .. } => {
                assert_eq!(category.as_category(), Some(UpdateCategory::ReleaseNotes));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_symbols_flags() {
        let cli = Cli::try_parse_from([
            "appledocs", "symbols", "swiftui", "--type", "struct", "--pattern", "*View",
            "--language", "occ",
        ])
        .unwrap();
        match cli.command {
            Commands::Symbols {
                framework,
                symbol_type,
                pattern,
                language,
                limit,
            } => {
                assert_eq!(framework, "swiftui");
                assert_eq!(symbol_type.as_node_kind(), Some(NodeKind::Struct));
                assert_eq!(pattern.as_deref(), Some("*View"));
                assert_eq!(Language::from(language), Language::Occ);
                assert_eq!(limit, 50);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
