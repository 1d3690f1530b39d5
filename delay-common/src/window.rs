//! Delay window validation
//!
//! A delay window is the closed interval `[min_delay, max_delay]`, in minutes,
//! within which an entity is expected to reappear after it was last seen.

use serde::{Deserialize, Serialize};

/// Validation error for a delay window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayWindowError {
    /// A bound is NaN or infinite
    NotFinite,
    /// Minimum delay is negative
    NegativeMin,
    /// Maximum delay is below the minimum delay
    MaxBelowMin,
}

impl std::fmt::Display for DelayWindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelayWindowError::NotFinite => write!(f, "delay bounds must be finite"),
            DelayWindowError::NegativeMin => write!(f, "minimum delay must not be negative"),
            DelayWindowError::MaxBelowMin => {
                write!(f, "maximum delay must not be below minimum delay")
            }
        }
    }
}

impl std::error::Error for DelayWindowError {}

/// Validate raw delay bounds
///
/// Checks:
/// - Both bounds are finite
/// - `min_delay >= 0`
/// - `max_delay >= min_delay`
///
/// # Errors
///
/// Returns a `DelayWindowError` variant describing the first failed check.
pub fn validate_delay_window(min_delay: f64, max_delay: f64) -> Result<(), DelayWindowError> {
    if !min_delay.is_finite() || !max_delay.is_finite() {
        return Err(DelayWindowError::NotFinite);
    }
    if min_delay < 0.0 {
        return Err(DelayWindowError::NegativeMin);
    }
    if max_delay < min_delay {
        return Err(DelayWindowError::MaxBelowMin);
    }
    Ok(())
}

/// Validated delay window in minutes
///
/// Only constructible through [`DelayWindow::new`], so holders can rely on
/// `0 <= min_delay <= max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDelayWindow", into = "RawDelayWindow")]
pub struct DelayWindow {
    min_delay: f64,
    max_delay: f64,
}

impl DelayWindow {
    /// Create a delay window from minute bounds
    ///
    /// # Errors
    ///
    /// See [`validate_delay_window`].
    pub fn new(min_delay: f64, max_delay: f64) -> Result<Self, DelayWindowError> {
        validate_delay_window(min_delay, max_delay)?;
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    /// Earliest expected reappearance, in minutes after last seen
    pub fn min_delay(&self) -> f64 {
        self.min_delay
    }

    /// Latest expected reappearance, in minutes after last seen
    pub fn max_delay(&self) -> f64 {
        self.max_delay
    }

    /// Whether `elapsed` minutes falls inside the window (both ends inclusive)
    pub fn contains(&self, elapsed: f64) -> bool {
        self.min_delay <= elapsed && elapsed <= self.max_delay
    }
}

/// Unvalidated serde shape of a delay window
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawDelayWindow {
    min_delay: f64,
    max_delay: f64,
}

impl TryFrom<RawDelayWindow> for DelayWindow {
    type Error = DelayWindowError;

    fn try_from(raw: RawDelayWindow) -> Result<Self, Self::Error> {
        DelayWindow::new(raw.min_delay, raw.max_delay)
    }
}

impl From<DelayWindow> for RawDelayWindow {
    fn from(window: DelayWindow) -> Self {
        Self {
            min_delay: window.min_delay,
            max_delay: window.max_delay,
        }
    }
}
