//! `folio sections` command implementation.

use clap::Args;

use super::PageArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sections command.
#[derive(Args)]
pub(crate) struct SectionsArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

impl SectionsArgs {
    /// Execute the sections command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.page.load_config()?;
        let sections = &config.sections;

        output.highlight("Navigation:");
        for item in &config.nav {
            let marker = if item.section == config.site.default_section {
                "*"
            } else {
                " "
            };
            output.emit(&format!("{marker} {:<28} {}", item.section, item.label))?;
        }

        if !sections.hub.is_empty() && !sections.sub_pages.is_empty() {
            output.highlight(&format!("Sub-pages of {}:", sections.hub));
            for sub_page in &sections.sub_pages {
                output.emit(&format!("  {sub_page}"))?;
            }
        }

        if !sections.composite.is_empty() {
            output.highlight("Composite sections:");
            for (section, parts) in &sections.composite {
                output.emit(&format!("  {section} = {}", parts.join(" + ")))?;
            }
        }

        output.info(&format!("Search order: {}", sections.search_order.join(", ")));
        if !config
            .nav
            .iter()
            .any(|item| item.section == config.site.default_section)
        {
            output.warning(&format!(
                "Start section '{}' has no navigation entry",
                config.site.default_section
            ));
        }
        Ok(())
    }
}
