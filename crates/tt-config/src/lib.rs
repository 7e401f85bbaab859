//! Configuration management for techtext.
//!
//! Parses `techtext.toml` configuration files with serde and provides
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
//! - `site.website`
//! - `content.source_dir`

mod expand;

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override posts source directory.
    pub source_dir: Option<PathBuf>,
    /// Override reading speed.
    pub words_per_minute: Option<u32>,
    /// Override contents list generation.
    pub toc: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "techtext.toml";

/// Default posts directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "src/content/blog";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Markdown pipeline configuration.
    pub markdown: MarkdownConfig,

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

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical site URL.
    pub website: String,
    /// Default post author.
    pub author: String,
    /// Site description.
    #[serde(alias = "desc")]
    pub description: String,
    /// Site title.
    pub title: String,
    /// Default social image.
    pub og_image: String,
    /// Whether both light and dark themes are offered.
    pub light_and_dark_mode: bool,
    /// Posts per listing page.
    pub posts_per_page: usize,
    /// Locales for date formatting (empty means environment default).
    pub locale: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            website: "https://techtext.dev/".to_owned(),
            author: "Ezzabuzaid".to_owned(),
            description: "We produce targeted articles and step-by-step guides, meticulously curated for software engineers.".to_owned(),
            title: "TechText".to_owned(),
            og_image: "logo.svg".to_owned(),
            light_and_dark_mode: true,
            posts_per_page: 6,
            locale: vec!["en-EN".to_owned()],
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding markdown posts.
    pub source_dir: PathBuf,
}

/// Markdown pipeline configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Reading speed for reading time estimates.
    pub words_per_minute: u32,
    /// Whether to generate a contents list.
    pub toc: bool,
    /// Pattern for the heading that receives the contents list.
    pub toc_heading: String,
    /// Deepest heading level listed in the contents.
    pub toc_max_depth: u8,
    /// Whether the contents list is tight.
    pub toc_tight: bool,
    /// Whether headings get a self-link anchor.
    pub autolink_headings: bool,
    /// Whether absolute links get external attributes.
    pub external_links: bool,
    /// `rel` values for external links.
    pub external_link_rel: Vec<String>,
    /// `target` for external links.
    pub external_link_target: Option<String>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            toc: true,
            toc_heading: "(table[ -]of[ -])?contents?|toc".to_owned(),
            toc_max_depth: 6,
            toc_tight: true,
            autolink_headings: true,
            external_links: true,
            external_link_rel: vec!["noopener".to_owned(), "noreferrer".to_owned()],
            external_link_target: Some("_blank".to_owned()),
        }
    }
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
        /// Config field path (e.g., "`site.website`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
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
    /// Otherwise, searches for `techtext.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(words_per_minute) = settings.words_per_minute {
            self.markdown.words_per_minute = words_per_minute;
        }
        if let Some(toc) = settings.toc {
            self.markdown.toc = toc;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            markdown: MarkdownConfig::default(),
            content_resolved: ContentConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
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

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_markdown()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.website, "site.website")?;
        require_http_url(&self.site.website, "site.website")?;

        if self.site.posts_per_page == 0 {
            return Err(ConfigError::Validation(
                "site.posts_per_page must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate markdown configuration.
    fn validate_markdown(&self) -> Result<(), ConfigError> {
        if self.markdown.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "markdown.words_per_minute must be greater than 0".to_owned(),
            ));
        }

        if !(1..=6).contains(&self.markdown.toc_max_depth) {
            return Err(ConfigError::Validation(
                "markdown.toc_max_depth must be between 1 and 6".to_owned(),
            ));
        }

        require_non_empty(&self.markdown.toc_heading, "markdown.toc_heading")?;
        if let Err(e) = Regex::new(&self.markdown.toc_heading) {
            return Err(ConfigError::Validation(format!(
                "markdown.toc_heading is not a valid pattern: {e}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.website = expand::expand_env(&self.site.website, "site.website")?;

        if let Some(ref source_dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(source_dir, "content.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(
                self.content
                    .source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SOURCE_DIR),
            ),
        };
    }
}
