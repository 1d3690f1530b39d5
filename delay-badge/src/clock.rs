//! Clock-time formatting for tooltip parameters

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Two-digit 24-hour clock, e.g. `09:05`
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Formats a timestamp as a short clock time
pub trait ClockFormatter {
    fn format_clock(&self, at: DateTime<Utc>) -> String;
}

impl<F> ClockFormatter for F
where
    F: Fn(DateTime<Utc>) -> String,
{
    fn format_clock(&self, at: DateTime<Utc>) -> String {
        self(at)
    }
}

/// Host's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl ClockFormatter for LocalClock {
    fn format_clock(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&Local).format(CLOCK_FORMAT).to_string()
    }
}

/// Fixed UTC offset, independent of the host's time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetClock(pub FixedOffset);

impl OffsetClock {
    /// Clock at UTC
    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    /// Clock at an offset in minutes east of UTC (`None` if out of range)
    pub fn from_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self)
    }
}

impl ClockFormatter for OffsetClock {
    fn format_clock(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format(CLOCK_FORMAT).to_string()
    }
}
