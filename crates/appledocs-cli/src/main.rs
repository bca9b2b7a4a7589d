//! appledocs CLI - Apple Developer documentation from the terminal
//!
//! This is the main entry point for the appledocs command-line interface.
//! All command implementations are organized in separate modules for
//! better maintainability and single responsibility.

use anyhow::Result;
use appledocs_core::doc::DocOptions;
use appledocs_core::{
    DocsClient, SampleFilters, SymbolQuery, TechnologyFilters, UpdateFilters,
};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli.command).await
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn execute_command(command: Commands) -> Result<()> {
    let client = DocsClient::new()?;

    match command {
        Commands::Search {
            query,
            result_type,
            limit,
        } => commands::search(&client, &query, result_type.into(), limit as usize).await,

        Commands::Doc {
            url,
            related,
            references,
            similar,
            platform,
        } => {
            let options = DocOptions {
                related,
                references,
                similar,
                platform,
            };
            commands::show_doc(&client, &url, options).await
        },

        Commands::Technologies {
            category,
            language,
            beta,
            limit,
        } => {
            let filters = TechnologyFilters {
                category,
                language: language.map(Into::into),
                include_beta: beta,
                limit: limit as usize,
            };
            commands::list_technologies(&client, &filters).await
        },

        Commands::Symbols {
            framework,
            symbol_type,
            pattern,
            language,
            limit,
        } => {
            let query = SymbolQuery {
                framework,
                kind: symbol_type.as_node_kind(),
                pattern,
                language: language.into(),
                limit: limit as usize,
            };
            commands::list_symbols(&client, &query).await
        },

        Commands::Updates {
            category,
            technology,
            year,
            search,
            beta,
            limit,
        } => {
            let filters = UpdateFilters {
                category: category.as_category(),
                technology,
                year,
                search,
                include_beta: beta,
                limit: limit as usize,
            };
            commands::list_updates(&client, &filters).await
        },

        Commands::Samples {
            framework,
            beta,
            search,
            limit,
        } => {
            let filters = SampleFilters {
                framework,
                beta: beta.into(),
                search,
                limit: limit as usize,
            };
            commands::list_samples(&client, &filters).await
        },

        Commands::Completions { shell } => {
            commands::generate(shell);
            Ok(())
        },
    }
}
