//! Delay Badge Library
//!
//! Localized presentation of a delay state: label, color and tooltip text.
//! The evaluation itself lives in `delay_common`.

pub mod args;
pub mod badge;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod i18n;

pub use badge::{BadgeView, render_badge, tooltip_text};
pub use cli::CliError;
pub use clock::{ClockFormatter, LocalClock, OffsetClock};
pub use config::{ConfigError, I18nConfig};
pub use i18n::{I18n, I18nError, LocaleTranslator, Translator, detect_locale};
