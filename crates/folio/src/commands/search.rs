//! `folio search` command implementation.

use clap::Args;
use folio_config::Locale;
use folio_page::SearchError;

use super::{PageArgs, source_description};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Term to search for (case-insensitive, matched literally).
    pub term: String,

    #[command(flatten)]
    pub page: PageArgs,
}

impl SearchArgs {
    /// Execute the search command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the term is blank, no
    /// section matches, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.page.load_config()?;
        output.info(&source_description(&config));

        let mut page = PageArgs::controller(&config);
        let locale = page.locale();
        let section = page
            .try_search(&self.term)
            .map_err(|e| search_error(&e, locale))?;

        self.page.write_html(&output, &page.html())?;
        output.success(&format!(
            "Found '{}' in section '{section}'",
            self.term.trim()
        ));
        Ok(())
    }
}

/// Map a search failure to a CLI error carrying the localized message.
fn search_error(err: &SearchError, locale: Locale) -> CliError {
    let message = err.message(locale);
    match err {
        SearchError::EmptyTerm => CliError::EmptyTerm(message),
        SearchError::NotFound { .. } | SearchError::InvalidTerm { .. } => {
            CliError::NoResults(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_blank_term_reported_once() {
        let err = search_error(&SearchError::EmptyTerm, Locale::En);
        assert!(matches!(err, CliError::EmptyTerm(_)));
        assert_eq!(err.to_string(), "Please enter a search term.");
    }

    #[test]
    fn test_not_found_is_localized() {
        let err = search_error(
            &SearchError::NotFound {
                term: "감리".to_owned(),
            },
            Locale::Ko,
        );
        assert!(matches!(err, CliError::NoResults(_)));
        assert_eq!(err.to_string(), "\"감리\"에 대한 검색 결과가 없습니다.");
    }
}
