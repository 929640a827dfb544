//! Configuration management for md2conf.
//!
//! Parses `md2conf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [markdown]
//! footnotes = true
//! heading_ids = false
//!
//! [code.aliases]
//! tsx = "js"
//! dockerfile = "bash"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override heading ID generation.
    pub heading_ids: Option<bool>,
    /// Override opening external links in a new tab.
    pub external_links_new_tab: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "md2conf.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Markdown parsing and rendering options.
    pub markdown: MarkdownConfig,
    /// Code macro options.
    pub code: CodeConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown parsing and rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownConfig {
    /// GitHub-style tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `- [ ]` task list items.
    pub tasklists: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
    /// `# Heading {#id .class}` attributes.
    pub heading_attributes: bool,
    /// Definition lists.
    pub definition_lists: bool,
    /// Generate `id` attributes for headings.
    pub heading_ids: bool,
    /// Open non-relative links in a new tab.
    pub external_links_new_tab: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: false,
            smart_punctuation: true,
            heading_attributes: true,
            definition_lists: true,
            heading_ids: true,
            external_links_new_tab: true,
        }
    }
}

/// Code macro options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeConfig {
    /// Extra language aliases, alias to canonical syntax name.
    ///
    /// Checked before the built-in table.
    pub aliases: BTreeMap<String, String>,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `md2conf.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(heading_ids) = settings.heading_ids {
            self.markdown.heading_ids = heading_ids;
        }
        if let Some(new_tab) = settings.external_links_new_tab {
            self.markdown.external_links_new_tab = new_tab;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Alias names and targets must be non-empty without surrounding
    /// whitespace.
    /// Whether a target names a known syntax is checked when the alias table
    /// is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (alias, target) in &self.code.aliases {
            require_token(alias, "code.aliases key")?;
            require_token(target, &format!("code.aliases.{alias}"))?;
        }
        Ok(())
    }
}

/// Require a string to be non-empty and trimmed.
fn require_token(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    if value.trim() != value {
        return Err(ConfigError::Validation(format!(
            "{field} cannot start or end with whitespace: {value:?}"
        )));
    }
    Ok(())
}
