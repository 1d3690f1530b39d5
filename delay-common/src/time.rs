//! Time constants and helpers for delay calculations
//!
//! Delays are expressed in minutes. Timestamps are compared at nanosecond
//! precision and converted to fractional minutes.

use chrono::{DateTime, TimeDelta, Utc};

/// Seconds per minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour
pub const MINUTES_PER_HOUR: u64 = 60;

/// Milliseconds per minute
pub const MILLIS_PER_MINUTE: f64 = (SECONDS_PER_MINUTE * 1000) as f64;

/// Nanoseconds per minute
pub const NANOS_PER_MINUTE: f64 = MILLIS_PER_MINUTE * 1_000_000.0;

/// Minutes elapsed between `since` and `now`, as a fractional value.
///
/// Negative when `since` lies in the future. Gaps too large for nanoseconds
/// (about 292 years) fall back to millisecond precision.
pub fn elapsed_minutes(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let delta = now - since;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_MINUTE,
        None => delta.num_milliseconds() as f64 / MILLIS_PER_MINUTE,
    }
}

/// Offset a timestamp by a (possibly fractional) number of minutes.
///
/// Rounded to the nearest millisecond. Saturates at the representable range.
pub fn add_minutes(at: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
    let millis = (minutes * MILLIS_PER_MINUTE).round() as i64;
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(if minutes < 0.0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
