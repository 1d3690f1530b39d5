//! Command-line driver
//!
//! Runs one badge evaluation for parsed [`Args`] and writes the result to the
//! given output. Failures come back as [`CliError`]; the binary prints them to
//! stderr and exits with status 1.

use std::io::Write;

use chrono::Utc;
use delay_common::time::add_minutes;
use delay_common::{DelayWindow, DelayWindowError};
use tracing::subscriber::SetGlobalDefaultError;

use crate::args::Args;
use crate::badge::{BadgeView, render_badge};
use crate::clock::{LocalClock, OffsetClock};
use crate::config::{ConfigError, I18nConfig};
use crate::constants::*;
use crate::i18n::{I18n, I18nError, detect_locale};

/// Error that aborts a command-line run
#[derive(Debug)]
pub enum CliError {
    /// `--min`/`--max` do not form a valid window
    InvalidWindow(DelayWindowError),
    /// `--i18n-config` could not be read or validated
    I18nConfig(ConfigError),
    /// Translations could not be built
    I18n(I18nError),
    /// `--utc-offset` is outside ±24 hours
    UtcOffset(i32),
    /// JSON serialization failed
    Json(serde_json::Error),
    /// Writing the output failed
    Io(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidWindow(e) => write!(f, "{}{}", ERR_INVALID_WINDOW, e),
            CliError::I18nConfig(e) => write!(f, "{}{}", ERR_I18N_CONFIG, e),
            CliError::I18n(e) => write!(f, "{}{}", ERR_I18N, e),
            CliError::UtcOffset(minutes) => write!(f, "{}{}", ERR_UTC_OFFSET, minutes),
            CliError::Json(e) => write!(f, "{}{}", ERR_JSON, e),
            CliError::Io(e) => write!(f, "{}{}", ERR_OUTPUT, e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidWindow(e) => Some(e),
            CliError::I18nConfig(e) => Some(e),
            CliError::I18n(e) => Some(e),
            CliError::UtcOffset(_) => None,
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Install a stderr log subscriber; `--debug` lowers the threshold to debug
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_tracing(debug: bool) -> Result<(), SetGlobalDefaultError> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Evaluate and print one badge
///
/// # Arguments
/// * `args` - Parsed command-line arguments
/// * `out` - Destination for the badge (stdout in the binary)
///
/// # Errors
/// Returns the first failure: window validation, config loading, translation
/// setup, clock offset, then serialization or write errors.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let window =
        DelayWindow::new(args.min_delay, args.max_delay).map_err(CliError::InvalidWindow)?;

    let config = match &args.i18n_config {
        Some(path) => I18nConfig::load(path).map_err(CliError::I18nConfig)?,
        None => I18nConfig::default(),
    };
    let i18n = I18n::new(&config).map_err(CliError::I18n)?;

    let requested = args
        .locale
        .clone()
        .or_else(detect_locale)
        .unwrap_or_else(|| i18n.default_locale().to_string());
    let translator = i18n.translator(&requested);
    tracing::debug!(requested, locale = translator.locale(), "selected locale");

    let now = args.now.unwrap_or_else(Utc::now);
    let last_seen_at = match (args.last_seen, args.ago) {
        (Some(at), _) => Some(at),
        (None, Some(minutes)) => Some(add_minutes(now, -minutes)),
        (None, None) => None,
    };

    let view = match args.utc_offset {
        Some(minutes) => {
            let clock = OffsetClock::from_minutes(minutes).ok_or(CliError::UtcOffset(minutes))?;
            render_badge(last_seen_at, &window, now, &clock, &translator)
        }
        None => render_badge(last_seen_at, &window, now, &LocalClock, &translator),
    };
    let view = if args.no_data_tooltip {
        view.with_no_data_tooltip(&translator)
    } else {
        view
    };

    write_view(&view, args, out)
}

fn write_view(view: &BadgeView, args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    if args.json {
        let json = serde_json::to_string_pretty(view).map_err(CliError::Json)?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    if args.no_color {
        writeln!(out, "{}", view.label)?;
    } else {
        writeln!(out, "{}", view.ansi_label())?;
    }
    writeln!(out, "{}{}", MSG_COLOR, view.color)?;
    if let Some(tooltip) = &view.tooltip {
        writeln!(out, "{}", tooltip)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["delay-badge"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn run_to_string(args: &Args) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // =========================================================================
    // Failures
    // =========================================================================

    #[test]
    fn test_inverted_window_is_rejected() {
        let err = run_to_string(&args(&["--min", "120", "--max", "30"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidWindow(DelayWindowError::MaxBelowMin)
        ));
        assert!(err.to_string().starts_with(ERR_INVALID_WINDOW));
    }

    #[test]
    fn test_negative_min_is_rejected() {
        let err = run_to_string(&args(&["--min", "-5", "--max", "30"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidWindow(DelayWindowError::NegativeMin)
        ));
    }

    #[test]
    fn test_out_of_range_offset_is_rejected() {
        let err = run_to_string(&args(&[
            "--min",
            "30",
            "--max",
            "120",
            "--locale",
            "en",
            "--utc-offset",
            "100000",
        ]))
        .unwrap_err();
        assert!(matches!(err, CliError::UtcOffset(100000)));
        assert_eq!(err.to_string(), format!("{}100000", ERR_UTC_OFFSET));
    }

    #[test]
    fn test_missing_i18n_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = run_to_string(&args(&[
            "--min",
            "30",
            "--max",
            "120",
            "--i18n-config",
            missing.to_str().unwrap(),
        ]))
        .unwrap_err();
        assert!(matches!(err, CliError::I18nConfig(ConfigError::Io(_))));
        assert!(err.to_string().starts_with(ERR_I18N_CONFIG));
    }

    #[test]
    fn test_invalid_i18n_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("i18n.json");
        std::fs::write(&path, r#"{"defaultLocale":"de","locales":["en"]}"#).unwrap();
        let err = run_to_string(&args(&[
            "--min",
            "30",
            "--max",
            "120",
            "--i18n-config",
            path.to_str().unwrap(),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::I18nConfig(ConfigError::DefaultNotListed(_))
        ));
    }

    #[test]
    fn test_second_subscriber_install_is_reported() {
        // Whichever call installs first, a later one must fail instead of panicking
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }

    // =========================================================================
    // Output
    // =========================================================================

    #[test]
    fn test_plain_text_output() {
        let output = run_to_string(&args(&[
            "--min",
            "30",
            "--max",
            "120",
            "--ago",
            "10",
            "--now",
            "2024-05-01T12:00:00Z",
            "--locale",
            "en",
            "--utc-offset",
            "0",
            "--no-color",
        ]))
        .unwrap();
        assert_eq!(
            output,
            "~20m\ncolor: warning\nLast seen at 11:50\nNot before 12:20\n"
        );
    }

    #[test]
    fn test_never_seen_output_has_no_tooltip() {
        let output = run_to_string(&args(&[
            "--min", "30", "--max", "120", "--locale", "fr", "--no-color",
        ]))
        .unwrap();
        assert_eq!(output, "?\ncolor: neutral\n");
    }

    #[test]
    fn test_json_output() {
        let output = run_to_string(&args(&[
            "--min",
            "30",
            "--max",
            "120",
            "--last-seen",
            "2024-05-01T10:30:00Z",
            "--now",
            "2024-05-01T12:00:00Z",
            "--locale",
            "fr",
            "--utc-offset",
            "0",
            "--json",
        ]))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["label"], "~30m");
        assert_eq!(
            value["tooltip"],
            "Vu pour la dernière fois à 10:30\nAu plus tard à 12:30"
        );
    }
}
