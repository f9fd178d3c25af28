//! Folio CLI - headless documentation viewer.
//!
//! Provides commands for:
//! - `show`: Render a section to HTML
//! - `search`: Find the first section containing a term and render it highlighted
//! - `sections`: List navigation entries and hub sub-pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{SearchArgs, SectionsArgs, ShowArgs};
use output::Output;

/// Folio - documentation viewer.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a section to HTML.
    Show(ShowArgs),
    /// Search sections for a term and render the first match.
    Search(SearchArgs),
    /// List navigation entries and sub-pages.
    Sections(SectionsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Show(args) => args.page.verbose,
            Self::Search(args) => args.page.verbose,
            Self::Sections(args) => args.page.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Show(args) => args.execute(),
        Commands::Search(args) => args.execute(),
        Commands::Sections(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
