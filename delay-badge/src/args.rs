//! Command-line argument parsing

use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

/// Parse a finite, non-negative number of minutes
fn parse_minutes(value: &str) -> Result<f64, String> {
    let minutes: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(format!("'{}' must be a finite, non-negative number", value));
    }
    Ok(minutes)
}

/// Show when an entity is expected to reappear
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Earliest expected reappearance, in minutes after last seen
    #[arg(long = "min", allow_negative_numbers = true)]
    pub min_delay: f64,

    /// Latest expected reappearance, in minutes after last seen
    #[arg(long = "max", allow_negative_numbers = true)]
    pub max_delay: f64,

    /// Last-seen time (RFC 3339); omit for "never seen"
    #[arg(long, conflicts_with = "ago")]
    pub last_seen: Option<DateTime<Utc>>,

    /// Last seen this many minutes before now
    #[arg(long, value_parser = parse_minutes)]
    pub ago: Option<f64>,

    /// Evaluate at this time instead of the current time (RFC 3339)
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Display language (default: detected from the system)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// JSON file with `defaultLocale` and `locales`
    #[arg(long = "i18n-config")]
    pub i18n_config: Option<PathBuf>,

    /// Format clock times at this UTC offset in minutes (default: local time)
    #[arg(long, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// Show a "no data" tooltip for never-seen entities
    #[arg(long, default_value = "false")]
    pub no_data_tooltip: bool,

    /// Print the badge as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}
