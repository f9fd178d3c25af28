//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.host`
//! - `content.base_url`
//!
//! ## Defaults
//!
//! Without a config file the site matches the audit guide layout: a
//! `content/` directory next to the working directory, Korean display
//! strings, the `faq` + `faq2` composite and the audit checkpoint hub.

mod expand;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page host.
    pub host: Option<String>,
    /// Override display locale.
    pub locale: Option<Locale>,
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override base URL (switches fetching to HTTP).
    pub base_url: Option<String>,
    /// Override raw HTML passthrough.
    pub raw_html: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page-level settings.
    pub site: SiteConfig,
    /// Content source configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Markdown rendering switches.
    pub render: RenderConfig,
    /// Section composition rules and search order.
    pub sections: SectionsConfig,
    /// Navigation entries in display order.
    pub nav: Vec<NavItem>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Display language for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Korean.
    #[default]
    Ko,
    /// English.
    En,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            other => Err(ConfigError::Validation(format!(
                "unsupported locale '{other}' (expected 'ko' or 'en')"
            ))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ko => "ko",
            Self::En => "en",
        })
    }
}

/// Page-level settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Host the page is served from. Links to other hosts open in a new context.
    pub host: String,
    /// Display language for error and notification messages.
    pub locale: Locale,
    /// Section loaded when the page starts.
    pub default_section: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            locale: Locale::Ko,
            default_section: "introduction".to_owned(),
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    base_url: Option<String>,
    dir: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Site root on disk. Resources live under `<source_dir>/<dir>/`.
    pub source_dir: PathBuf,
    /// Remote site root. When set, resources are fetched over HTTP.
    pub base_url: Option<String>,
    /// Resource directory relative to the site root.
    pub dir: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

/// Markdown rendering switches.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pass raw HTML blocks through instead of escaping them.
    pub raw_html: bool,
    /// Prepare diagram blocks for the client diagram library.
    pub diagrams: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            raw_html: false,
            diagrams: true,
        }
    }
}

/// Section composition rules.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Sections assembled from several resources, in concatenation order.
    pub composite: BTreeMap<String, Vec<String>>,
    /// Section whose in-page links lead to the sub-pages.
    pub hub: String,
    /// Sections reachable from the hub page.
    pub sub_pages: Vec<String>,
    /// Order in which sections are scanned by search.
    pub search_order: Vec<String>,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            composite: BTreeMap::from([(
                "faq".to_owned(),
                vec!["faq".to_owned(), "faq2".to_owned()],
            )]),
            hub: "audit_checkpoints".to_owned(),
            sub_pages: to_owned_vec(&[
                "latest_checkpoints",
                "latest_technical",
                "latest_additional",
                "security_iso27001",
                "gov_quality_manual",
                "data_quality_assessment",
            ]),
            search_order: to_owned_vec(&[
                "introduction",
                "preparation",
                "procedures",
                "field_audit",
                "reporting",
                "audit_checkpoints",
                "resources",
                "security_iso27001",
                "gov_quality_manual",
                "data_quality_assessment",
            ]),
        }
    }
}

/// Navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavItem {
    /// Section loaded when the entry is clicked.
    pub section: String,
    /// Display label.
    pub label: String,
}

fn default_nav() -> Vec<NavItem> {
    [
        ("introduction", "소개"),
        ("preparation", "감리 준비"),
        ("procedures", "감리 절차"),
        ("field_audit", "현장 감리"),
        ("reporting", "결과 보고"),
        ("audit_checkpoints", "감리 점검항목"),
        ("resources", "참고 자료"),
        ("faq", "자주 묻는 질문"),
    ]
    .into_iter()
    .map(|(section, label)| NavItem {
        section: section.to_owned(),
        label: label.to_owned(),
    })
    .collect()
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.base_url`").
        field: String,
        /// Error message (e.g., "${`FOLIO_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.site.host.clone_from(host);
        }
        if let Some(locale) = settings.locale {
            self.site.locale = locale;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.content_resolved.base_url = Some(base_url.clone());
        }
        if let Some(raw_html) = settings.raw_html {
            self.render.raw_html = raw_html;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            render: RenderConfig::default(),
            sections: SectionsConfig::default(),
            nav: default_nav(),
            content_resolved: ContentConfig {
                source_dir: base.to_path_buf(),
                base_url: None,
                dir: "content".to_owned(),
                timeout_secs: 30,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_content()?;
        self.validate_sections()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.host, "site.host")?;
        require_non_empty(&self.site.default_section, "site.default_section")
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.content_resolved.base_url {
            require_non_empty(base_url, "content.base_url")?;
            require_http_url(base_url, "content.base_url")?;
        }
        require_non_empty(&self.content_resolved.dir, "content.dir")?;
        if self.content_resolved.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "content.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_sections(&self) -> Result<(), ConfigError> {
        if self.sections.search_order.is_empty() {
            return Err(ConfigError::Validation(
                "sections.search_order cannot be empty".to_owned(),
            ));
        }
        for (section, parts) in &self.sections.composite {
            if parts.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sections.composite.{section} needs at least one part"
                )));
            }
        }

        let mut seen = HashSet::new();
        for item in &self.nav {
            require_non_empty(&item.section, "nav.section")?;
            if !seen.insert(item.section.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "nav entry '{}' appears more than once",
                    item.section
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.host = expand::expand_env(&self.site.host, "site.host")?;

        if let Some(ref url) = self.content.base_url {
            self.content.base_url = Some(expand::expand_env(url, "content.base_url")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(self.content.source_dir.as_deref().unwrap_or(".")),
            base_url: self
                .content
                .base_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_owned()),
            dir: self
                .content
                .dir
                .as_deref()
                .unwrap_or("content")
                .trim_matches('/')
                .to_owned(),
            timeout_secs: self.content.timeout_secs.unwrap_or(30),
        };
    }
}
