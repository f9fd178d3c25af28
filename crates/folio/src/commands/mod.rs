//! CLI command implementations.

pub(crate) mod search;
pub(crate) mod sections;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config, Locale};
use folio_page::PageController;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use search::SearchArgs;
pub(crate) use sections::SectionsArgs;
pub(crate) use show::ShowArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site directory holding the content resources (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Remote site root; resources are fetched over HTTP (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Page host used to tell external links apart (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Display language of messages: ko or en (overrides config).
    #[arg(long)]
    locale: Option<Locale>,

    /// Pass raw HTML in markdown through instead of escaping it.
    #[arg(long)]
    raw_html: bool,

    /// Write rendered HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (show load and search logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PageArgs {
    /// Load config with CLI overrides applied.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host: self.host.clone(),
            locale: self.locale,
            source_dir: self.source_dir.clone(),
            base_url: self.base_url.clone(),
            raw_html: self.raw_html.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Page controller for the configured content source.
    fn controller(config: &Config) -> PageController {
        PageController::from_config(config)
    }

    /// Write the page HTML to `--output` or stdout.
    fn write_html(&self, output: &Output, html: &str) -> Result<(), CliError> {
        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                output.info(&format!("Wrote {}", path.display()));
            }
            None => output.emit(html)?,
        }
        Ok(())
    }
}

/// Describe where content is read from.
fn source_description(config: &Config) -> String {
    let content = &config.content_resolved;
    match &content.base_url {
        Some(base_url) => format!("Content: {base_url}/{}", content.dir),
        None => format!(
            "Content: {}",
            content.source_dir.join(&content.dir).display()
        ),
    }
}
