//! Internationalization support
//!
//! Fluent bundles for the bundled display languages, built once from the
//! [`I18nConfig`] and shared across renders. Lookups fall back to the default
//! locale, then to the message id itself.

use std::collections::HashMap;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::config::{ConfigError, I18nConfig};

/// Locales with bundled translations
pub const SUPPORTED_LOCALES: &[&str] = &["en", "fr"];

/// Message id for the generic "no data" text
pub const NO_DATA_KEY: &str = "badge-no-data";

/// Bundled Fluent source for a locale
fn resource_source(locale: &str) -> Option<&'static str> {
    match locale {
        "en" => Some(include_str!("../locales/en.ftl")),
        "fr" => Some(include_str!("../locales/fr.ftl")),
        _ => None,
    }
}

// =============================================================================
// Translator
// =============================================================================

/// Message lookup: id plus named string arguments to localized text
pub trait Translator {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        self(key, args)
    }
}

/// [`I18n`] bound to a single locale
#[derive(Clone, Copy)]
pub struct LocaleTranslator<'a> {
    i18n: &'a I18n,
    locale: &'a str,
}

impl LocaleTranslator<'_> {
    /// Locale this translator formats for
    pub fn locale(&self) -> &str {
        self.locale
    }
}

impl Translator for LocaleTranslator<'_> {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.i18n.t_args(self.locale, key, args)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur while building the translation bundles
#[derive(Debug)]
pub enum I18nError {
    /// Configuration is invalid
    Config(ConfigError),
    /// Locale is not a valid language tag
    InvalidLocale(String),
    /// No bundled translations for the locale
    MissingResource(String),
    /// Bundled Fluent source failed to parse
    Parse(String),
    /// Resource conflicts with existing messages in the bundle
    Resource(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::Config(e) => write!(f, "{}", e),
            I18nError::InvalidLocale(l) => write!(f, "invalid locale '{}'", l),
            I18nError::MissingResource(l) => write!(f, "no translations for locale '{}'", l),
            I18nError::Parse(l) => write!(f, "failed to parse translations for '{}'", l),
            I18nError::Resource(l) => write!(f, "failed to load translations for '{}'", l),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            I18nError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for I18nError {
    fn from(e: ConfigError) -> Self {
        I18nError::Config(e)
    }
}

// =============================================================================
// I18n
// =============================================================================

/// Translation bundles for the configured locales
pub struct I18n {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    default_locale: String,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut locales: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        locales.sort_unstable();
        f.debug_struct("I18n")
            .field("locales", &locales)
            .field("default_locale", &self.default_locale)
            .finish()
    }
}

impl I18n {
    /// Build bundles for every configured locale
    pub fn new(config: &I18nConfig) -> Result<Self, I18nError> {
        config.validate()?;

        let mut bundles = HashMap::with_capacity(config.locales.len());
        for locale in &config.locales {
            bundles.insert(locale.clone(), build_bundle(locale)?);
        }

        Ok(Self {
            bundles,
            default_locale: config.default_locale.clone(),
        })
    }

    /// Locale used when a requested one is unavailable
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Whether a bundle exists for this exact locale
    pub fn has_locale(&self, locale: &str) -> bool {
        self.bundles.contains_key(locale)
    }

    /// Map a requested locale tag to a loaded locale
    ///
    /// Accepts forms like `fr`, `fr-FR`, `en_US.UTF-8`. Anything not loaded
    /// resolves to the default locale.
    pub fn resolve_locale<'a>(&'a self, requested: &str) -> &'a str {
        let language = language_of(requested);
        match self.bundles.get_key_value(language.as_str()) {
            Some((locale, _)) => locale,
            None => {
                tracing::debug!(
                    requested,
                    fallback = %self.default_locale,
                    "locale not available, using default"
                );
                &self.default_locale
            }
        }
    }

    /// Translator bound to the resolved form of `locale`
    pub fn translator<'a>(&'a self, locale: &str) -> LocaleTranslator<'a> {
        LocaleTranslator {
            i18n: self,
            locale: self.resolve_locale(locale),
        }
    }

    /// Translate a message without arguments
    pub fn t(&self, locale: &str, key: &str) -> String {
        self.t_args(locale, key, &[])
    }

    /// Translate a message with named arguments
    ///
    /// Falls back to the default locale, then to `key` when no bundle has
    /// the message.
    pub fn t_args(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        let locale = self.resolve_locale(locale);
        self.bundles
            .get(locale)
            .and_then(|bundle| format_message(bundle, key, args))
            .or_else(|| {
                tracing::debug!(locale, key, "missing translation");
                self.bundles
                    .get(&self.default_locale)
                    .and_then(|bundle| format_message(bundle, key, args))
            })
            .unwrap_or_else(|| key.to_string())
    }
}

/// Detect the operating system's preferred locale
pub fn detect_locale() -> Option<String> {
    sys_locale::get_locale()
}

/// Primary language subtag of a locale string, lowercased
fn language_of(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Build a Fluent bundle from the bundled source for a locale
fn build_bundle(locale: &str) -> Result<FluentBundle<FluentResource>, I18nError> {
    let langid: LanguageIdentifier = locale
        .parse()
        .map_err(|_| I18nError::InvalidLocale(locale.to_string()))?;
    let source =
        resource_source(locale).ok_or_else(|| I18nError::MissingResource(locale.to_string()))?;
    let resource = FluentResource::try_new(source.to_string())
        .map_err(|_| I18nError::Parse(locale.to_string()))?;

    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Interpolated values are plain text; no bidi isolation marks
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|_| I18nError::Resource(locale.to_string()))?;
    Ok(bundle)
}

/// Format a message value, `None` if the bundle lacks it
fn format_message(
    bundle: &FluentBundle<FluentResource>,
    key: &str,
    args: &[(&str, &str)],
) -> Option<String> {
    let pattern = bundle.get_message(key)?.value()?;

    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, *value);
    }

    let mut errors = Vec::new();
    let text = bundle.format_pattern(pattern, Some(&fluent_args), &mut errors);
    if !errors.is_empty() {
        tracing::debug!(key, ?errors, "errors while formatting message");
    }
    Some(text.into_owned())
}
