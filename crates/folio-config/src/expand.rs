//! `${VAR}` expansion for string settings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned as-is, so bare `$VAR` is left alone.
/// `field` names the setting in the error when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that had no value and no default.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_host_from_env() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("FOLIO_TEST_HOST", "docs.example.org");
        }
        let result = expand_env("${FOLIO_TEST_HOST}", "site.host").unwrap();
        assert_eq!(result, "docs.example.org");
        unsafe {
            std::env::remove_var("FOLIO_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET_BASE");
        }
        let result = expand_env(
            "${FOLIO_TEST_UNSET_BASE:-https://cdn.example.org}",
            "content.base_url",
        )
        .unwrap();
        assert_eq!(result, "https://cdn.example.org");
    }

    #[test]
    fn test_expand_embedded_in_url() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("FOLIO_TEST_BUCKET", "guides");
        }
        let result = expand_env("https://${FOLIO_TEST_BUCKET}.example.org/site", "url").unwrap();
        assert_eq!(result, "https://guides.example.org/site");
        unsafe {
            std::env::remove_var("FOLIO_TEST_BUCKET");
        }
    }

    #[test]
    fn test_missing_var_names_field_and_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}", "site.host").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("FOLIO_TEST_MISSING"));
        assert!(msg.contains("site.host"));
    }

    #[test]
    fn test_plain_values_untouched() {
        assert_eq!(expand_env("localhost", "site.host").unwrap(), "localhost");
        assert_eq!(
            expand_env("https://example.org/$path", "content.base_url").unwrap(),
            "https://example.org/$path"
        );
    }
}
