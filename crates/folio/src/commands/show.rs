//! `folio show` command implementation.

use clap::Args;
use folio_page::LoadOutcome;

use super::{PageArgs, source_description};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Section identifier (default: the configured start section).
    pub section: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the section cannot be
    /// loaded, or the output file cannot be written. On a failed load the
    /// page HTML, holding the inline error, is still written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.page.load_config()?;
        output.info(&source_description(&config));

        let mut page = PageArgs::controller(&config);
        let outcome = match &self.section {
            None => page.start(),
            // Navigation entries go through the nav so the active marker is set.
            Some(section) if page.state().has_nav_entry(section) => page.click_nav(section)?,
            Some(section) => page.load_section(section),
        };

        self.page.write_html(&output, &page.html())?;

        match outcome {
            LoadOutcome::Rendered { section } => {
                output.success(&format!("Rendered section '{section}'"));
                Ok(())
            }
            LoadOutcome::Failed { section, reason } => Err(CliError::Load { section, reason }),
            LoadOutcome::Superseded { .. } => Ok(()),
        }
    }
}
