//! User-facing strings in the page's display language.

use folio_config::Locale;

/// Localized messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Messages for `locale`.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Display language.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Inline message shown when a section cannot be loaded.
    #[must_use]
    pub fn load_error(&self, reason: &str) -> String {
        match self.locale {
            Locale::Ko => format!("콘텐츠를 불러오는 중 오류가 발생했습니다: {reason}"),
            Locale::En => format!("An error occurred while loading content: {reason}"),
        }
    }

    /// Notification for a blank search.
    #[must_use]
    pub fn empty_search_term(&self) -> String {
        match self.locale {
            Locale::Ko => "검색어를 입력해주세요.".to_owned(),
            Locale::En => "Please enter a search term.".to_owned(),
        }
    }

    /// Notification when no section contains `term`.
    #[must_use]
    pub fn no_results(&self, term: &str) -> String {
        match self.locale {
            Locale::Ko => format!("\"{term}\"에 대한 검색 결과가 없습니다."),
            Locale::En => format!("No results found for \"{term}\"."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_messages() {
        let messages = Messages::new(Locale::Ko);
        assert!(messages.load_error("HTTP error! status: 404").ends_with("status: 404"));
        assert_eq!(messages.empty_search_term(), "검색어를 입력해주세요.");
        assert!(messages.no_results("감리").starts_with("\"감리\""));
    }

    #[test]
    fn test_english_messages() {
        let messages = Messages::new(Locale::En);
        assert_eq!(
            messages.load_error("network error: timeout"),
            "An error occurred while loading content: network error: timeout"
        );
        assert_eq!(messages.no_results("cat"), "No results found for \"cat\".");
    }
}
