//! Localization configuration
//!
//! Which display languages are enabled and which one is used when a requested
//! locale is not available. Loaded from JSON, defaults to French with English
//! as the second language.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::i18n::SUPPORTED_LOCALES;

/// Default display language
pub const DEFAULT_LOCALE: &str = "fr";

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur while loading or validating the i18n configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the config file
    Io(io::Error),
    /// File is not valid JSON for this structure
    Json(serde_json::Error),
    /// No locales configured
    NoLocales,
    /// Default locale is not among the configured locales
    DefaultNotListed(String),
    /// A configured locale has no bundled translations
    Unsupported(String),
    /// A locale is listed twice
    Duplicate(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "invalid config: {}", e),
            ConfigError::NoLocales => write!(f, "no locales configured"),
            ConfigError::DefaultNotListed(l) => {
                write!(f, "default locale '{}' is not in the locale list", l)
            }
            ConfigError::Unsupported(l) => write!(f, "unsupported locale '{}'", l),
            ConfigError::Duplicate(l) => write!(f, "locale '{}' listed more than once", l),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

// =============================================================================
// I18n Config
// =============================================================================

/// Enabled display languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nConfig {
    /// Locale used when a requested one is unavailable
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Enabled locales
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: default_locales(),
        }
    }
}

impl I18nConfig {
    /// Load and validate a config from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: I18nConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the locale list against the bundled translations
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` variant describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::NoLocales);
        }
        for (i, locale) in self.locales.iter().enumerate() {
            if !SUPPORTED_LOCALES.contains(&locale.as_str()) {
                return Err(ConfigError::Unsupported(locale.clone()));
            }
            if self.locales[..i].contains(locale) {
                return Err(ConfigError::Duplicate(locale.clone()));
            }
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ConfigError::DefaultNotListed(self.default_locale.clone()));
        }
        Ok(())
    }
}
