//! Delay state types
//!
//! A [`DelayState`] is derived from a last-seen timestamp and a delay window.
//! It is recomputed on every evaluation and never mutated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::time::MINUTES_PER_HOUR;

/// Glyph shown when no countdown applies (never seen, or overdue)
pub const UNKNOWN_GLYPH: &str = "?";

/// Prefix marking a displayed duration as approximate
pub const APPROX_PREFIX: &str = "~";

/// Where the elapsed time falls relative to the delay window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayCategory {
    /// Never observed
    Unknown,
    /// Elapsed time exceeds the maximum delay
    Overdue,
    /// Elapsed time has not reached the minimum delay yet
    BeforeMin,
    /// Elapsed time is inside `[min_delay, max_delay]`
    InWindow,
}

impl DelayCategory {
    /// Color hint for this category
    pub fn color(self) -> ColorHint {
        match self {
            Self::Unknown | Self::Overdue => ColorHint::Neutral,
            Self::BeforeMin => ColorHint::Warning,
            Self::InWindow => ColorHint::Positive,
        }
    }
}

/// Presentation color, independent of any styling framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorHint {
    /// Muted gray
    Neutral,
    /// Strong warning (red)
    Warning,
    /// Positive (green)
    Positive,
}

impl ColorHint {
    /// RGB components for this hint
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Neutral => (0x6b, 0x72, 0x80), // Gray
            Self::Warning => (0xef, 0x44, 0x44), // Red
            Self::Positive => (0x22, 0xc5, 0x5e), // Green
        }
    }

    /// `#rrggbb` hex string for this hint
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Stable lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Warning => "warning",
            Self::Positive => "positive",
        }
    }
}

impl std::fmt::Display for ColorHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaining minutes until a window edge
///
/// Kept fractional; truncation only happens when splitting for display.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RemainingTime {
    minutes: f64,
}

impl RemainingTime {
    /// Wrap a remaining duration in minutes (negative values clamp to zero)
    pub fn new(minutes: f64) -> Self {
        Self {
            minutes: minutes.max(0.0),
        }
    }

    /// Fractional remaining minutes
    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    /// `floor(minutes)`
    pub fn whole_minutes(&self) -> u64 {
        self.minutes.floor() as u64
    }

    /// Whole hours: `floor(minutes / 60)`
    pub fn hours(&self) -> u64 {
        self.whole_minutes() / MINUTES_PER_HOUR
    }

    /// Minutes past the whole hours: `floor(minutes mod 60)`
    pub fn minutes_part(&self) -> u64 {
        self.whole_minutes() % MINUTES_PER_HOUR
    }

    /// Compact label: `~2h 5m`, `~2h`, or `~5m`
    ///
    /// The approximation prefix attaches to the most significant unit. A
    /// remainder under one minute reads `~0m`.
    pub fn label(&self) -> String {
        let hours = self.hours();
        let minutes = self.minutes_part();
        match (hours, minutes) {
            (0, m) => format!("{}{}m", APPROX_PREFIX, m),
            (h, 0) => format!("{}{}h", APPROX_PREFIX, h),
            (h, m) => format!("{}{}h {}m", APPROX_PREFIX, h, m),
        }
    }
}

/// One line of the tooltip, as a message id plus its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "key", content = "time", rename_all = "kebab-case")]
pub enum TooltipLine {
    /// "Last seen at {time}"
    LastSeenAt(DateTime<Utc>),
    /// "May reappear at any time"
    AnyTime,
    /// "Not before {time}"
    MinDelay(DateTime<Utc>),
    /// "At the latest by {time}"
    MaxDelay(DateTime<Utc>),
}

impl TooltipLine {
    /// Message id for localization
    pub fn key(&self) -> &'static str {
        match self {
            Self::LastSeenAt(_) => "apparition-last-seen-at",
            Self::AnyTime => "apparition-any-time",
            Self::MinDelay(_) => "apparition-min-delay",
            Self::MaxDelay(_) => "apparition-max-delay",
        }
    }

    /// Timestamp substituted as the `time` parameter, if any
    pub fn time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::LastSeenAt(t) | Self::MinDelay(t) | Self::MaxDelay(t) => Some(*t),
            Self::AnyTime => None,
        }
    }
}

/// Name of the timestamp parameter in tooltip messages
pub const TIME_PARAM: &str = "time";

/// Result of evaluating a last-seen timestamp against a delay window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayState {
    /// Discriminated display category
    pub category: DelayCategory,
    /// Present only for `BeforeMin` and `InWindow`
    #[serde(rename = "remaining_minutes")]
    pub remaining: Option<RemainingTime>,
    /// Tooltip lines, omitted for `Unknown`
    pub tooltip: Option<Vec<TooltipLine>>,
}

impl DelayState {
    /// State for an entity that was never observed
    pub fn unknown() -> Self {
        Self {
            category: DelayCategory::Unknown,
            remaining: None,
            tooltip: None,
        }
    }

    /// Color hint derived from the category
    pub fn color(&self) -> ColorHint {
        self.category.color()
    }

    /// Badge text: a countdown, or the unknown glyph
    pub fn label(&self) -> String {
        match self.remaining {
            Some(remaining) => remaining.label(),
            None => UNKNOWN_GLYPH.to_string(),
        }
    }
}
