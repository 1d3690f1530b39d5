//! Delay state calculation
//!
//! Maps `(last_seen_at, window, now)` to a [`DelayState`]. Pure and
//! side-effect free apart from a warning when raw bounds are rejected.

use chrono::{DateTime, Utc};

use crate::state::{DelayCategory, DelayState, RemainingTime, TooltipLine};
use crate::time::{add_minutes, elapsed_minutes};
use crate::window::DelayWindow;

/// Evaluate the delay state for an entity
///
/// # Arguments
/// * `last_seen_at` - When the entity was last observed, `None` if never
/// * `window` - Expected reappearance window in minutes
/// * `now` - Current time
///
/// # Returns
/// * `Unknown` when never observed (no countdown, no tooltip)
/// * `Overdue` when elapsed time exceeds the maximum delay
/// * `BeforeMin` with the time until the window opens
/// * `InWindow` with the time until the window closes
pub fn evaluate(
    last_seen_at: Option<DateTime<Utc>>,
    window: &DelayWindow,
    now: DateTime<Utc>,
) -> DelayState {
    let Some(last_seen_at) = last_seen_at else {
        return DelayState::unknown();
    };

    let elapsed = elapsed_minutes(last_seen_at, now);
    let seen = TooltipLine::LastSeenAt(last_seen_at);

    if elapsed > window.max_delay() {
        return DelayState {
            category: DelayCategory::Overdue,
            remaining: None,
            tooltip: Some(vec![seen, TooltipLine::AnyTime]),
        };
    }

    if elapsed < window.min_delay() {
        let opens_at = add_minutes(last_seen_at, window.min_delay());
        return DelayState {
            category: DelayCategory::BeforeMin,
            remaining: Some(RemainingTime::new(window.min_delay() - elapsed)),
            tooltip: Some(vec![seen, TooltipLine::MinDelay(opens_at)]),
        };
    }

    let closes_at = add_minutes(last_seen_at, window.max_delay());
    DelayState {
        category: DelayCategory::InWindow,
        remaining: Some(RemainingTime::new(window.max_delay() - elapsed)),
        tooltip: Some(vec![seen, TooltipLine::MaxDelay(closes_at)]),
    }
}

/// Evaluate with raw minute bounds
///
/// Invalid bounds are a caller bug. They are logged and yield the `Unknown`
/// state so a hosting view keeps rendering.
pub fn evaluate_minutes(
    last_seen_at: Option<DateTime<Utc>>,
    min_delay: f64,
    max_delay: f64,
    now: DateTime<Utc>,
) -> DelayState {
    match DelayWindow::new(min_delay, max_delay) {
        Ok(window) => evaluate(last_seen_at, &window, now),
        Err(e) => {
            tracing::warn!(min_delay, max_delay, error = %e, "rejected delay window");
            DelayState::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ColorHint;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn window() -> DelayWindow {
        DelayWindow::new(30.0, 120.0).unwrap()
    }

    fn ago(minutes: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::minutes(minutes))
    }

    #[test]
    fn test_never_seen_is_unknown() {
        let state = evaluate(None, &window(), now());
        assert_eq!(state.category, DelayCategory::Unknown);
        assert!(state.remaining.is_none());
        assert!(state.tooltip.is_none());
        assert_eq!(state.label(), "?");
    }

    #[test]
    fn test_before_min() {
        let state = evaluate(ago(10), &window(), now());
        assert_eq!(state.category, DelayCategory::BeforeMin);
        assert_eq!(state.remaining.unwrap().minutes(), 20.0);
        assert_eq!(state.label(), "~20m");
        assert_eq!(state.color(), ColorHint::Warning);
        assert_eq!(
            state.tooltip.unwrap(),
            vec![
                TooltipLine::LastSeenAt(now() - Duration::minutes(10)),
                TooltipLine::MinDelay(now() + Duration::minutes(20)),
            ]
        );
    }

    #[test]
    fn test_in_window() {
        let state = evaluate(ago(90), &window(), now());
        assert_eq!(state.category, DelayCategory::InWindow);
        assert_eq!(state.remaining.unwrap().minutes(), 30.0);
        assert_eq!(state.label(), "~30m");
        assert_eq!(state.color(), ColorHint::Positive);
        assert_eq!(
            state.tooltip.unwrap(),
            vec![
                TooltipLine::LastSeenAt(now() - Duration::minutes(90)),
                TooltipLine::MaxDelay(now() + Duration::minutes(30)),
            ]
        );
    }

    #[test]
    fn test_overdue() {
        let state = evaluate(ago(200), &window(), now());
        assert_eq!(state.category, DelayCategory::Overdue);
        assert!(state.remaining.is_none());
        assert_eq!(state.label(), "?");
        assert_eq!(state.color(), ColorHint::Neutral);
        assert_eq!(
            state.tooltip.unwrap(),
            vec![
                TooltipLine::LastSeenAt(now() - Duration::minutes(200)),
                TooltipLine::AnyTime,
            ]
        );
    }

    // =========================================================================
    // Boundaries
    // =========================================================================

    #[test]
    fn test_lower_bound_is_in_window() {
        let state = evaluate(ago(30), &window(), now());
        assert_eq!(state.category, DelayCategory::InWindow);
        assert_eq!(state.remaining.unwrap().minutes(), 90.0);
    }

    #[test]
    fn test_upper_bound_is_in_window() {
        let state = evaluate(ago(120), &window(), now());
        assert_eq!(state.category, DelayCategory::InWindow);
        assert_eq!(state.remaining.unwrap().minutes(), 0.0);
        assert_eq!(state.label(), "~0m");
    }

    #[test]
    fn test_just_past_upper_bound_is_overdue() {
        let last = now() - Duration::minutes(120) - Duration::milliseconds(1);
        let state = evaluate(Some(last), &window(), now());
        assert_eq!(state.category, DelayCategory::Overdue);
    }

    #[test]
    fn test_sub_millisecond_past_upper_bound_is_overdue() {
        let last = now() - Duration::minutes(120) - Duration::microseconds(500);
        let state = evaluate(Some(last), &window(), now());
        assert_eq!(state.category, DelayCategory::Overdue);
        assert!(state.remaining.is_none());
    }

    #[test]
    fn test_sub_millisecond_before_lower_bound_is_before_min() {
        let last = now() - Duration::minutes(30) + Duration::microseconds(500);
        let state = evaluate(Some(last), &window(), now());
        assert_eq!(state.category, DelayCategory::BeforeMin);
        assert!(state.remaining.unwrap().minutes() > 0.0);
    }

    #[test]
    fn test_sub_millisecond_inside_edges_is_in_window() {
        let lower = now() - Duration::minutes(30) - Duration::nanoseconds(1);
        assert_eq!(
            evaluate(Some(lower), &window(), now()).category,
            DelayCategory::InWindow
        );

        let upper = now() - Duration::minutes(120) + Duration::nanoseconds(1);
        assert_eq!(
            evaluate(Some(upper), &window(), now()).category,
            DelayCategory::InWindow
        );
    }

    #[test]
    fn test_fractional_elapsed_not_truncated() {
        // 29.5 minutes elapsed is still before the window opens
        let last = now() - Duration::seconds(29 * 60 + 30);
        let state = evaluate(Some(last), &window(), now());
        assert_eq!(state.category, DelayCategory::BeforeMin);
        assert_eq!(state.remaining.unwrap().minutes(), 0.5);
        assert_eq!(state.label(), "~0m");
    }

    #[test]
    fn test_fractional_remaining_near_zero_in_window() {
        let last = now() - Duration::seconds(119 * 60 + 45);
        let state = evaluate(Some(last), &window(), now());
        assert_eq!(state.category, DelayCategory::InWindow);
        assert_eq!(state.remaining.unwrap().minutes(), 0.25);
        assert_eq!(state.label(), "~0m");
    }

    #[test]
    fn test_zero_width_window() {
        let window = DelayWindow::new(45.0, 45.0).unwrap();
        assert_eq!(
            evaluate(ago(45), &window, now()).category,
            DelayCategory::InWindow
        );
        assert_eq!(
            evaluate(ago(44), &window, now()).category,
            DelayCategory::BeforeMin
        );
        assert_eq!(
            evaluate(ago(46), &window, now()).category,
            DelayCategory::Overdue
        );
    }

    #[test]
    fn test_future_last_seen_is_before_min() {
        let state = evaluate(Some(now() + Duration::minutes(5)), &window(), now());
        assert_eq!(state.category, DelayCategory::BeforeMin);
        assert_eq!(state.remaining.unwrap().minutes(), 35.0);
    }

    #[test]
    fn test_hours_label() {
        let window = DelayWindow::new(180.0, 240.0).unwrap();
        let state = evaluate(ago(55), &window, now());
        assert_eq!(state.category, DelayCategory::BeforeMin);
        assert_eq!(state.label(), "~2h 5m");
    }

    #[test]
    fn test_remaining_matches_window_edges() {
        let window = window();
        for minutes in 0..=130 {
            let state = evaluate(ago(minutes), &window, now());
            let elapsed = minutes as f64;
            match state.category {
                DelayCategory::BeforeMin => {
                    assert!(elapsed < 30.0);
                    assert_eq!(state.remaining.unwrap().minutes(), 30.0 - elapsed);
                }
                DelayCategory::InWindow => {
                    assert!(window.contains(elapsed));
                    assert_eq!(state.remaining.unwrap().minutes(), 120.0 - elapsed);
                }
                DelayCategory::Overdue => {
                    assert!(elapsed > 120.0);
                    assert!(state.remaining.is_none());
                }
                DelayCategory::Unknown => panic!("unexpected unknown for {}", minutes),
            }
        }
    }

    // =========================================================================
    // Raw bounds
    // =========================================================================

    #[test]
    fn test_evaluate_minutes_valid() {
        let state = evaluate_minutes(ago(10), 30.0, 120.0, now());
        assert_eq!(state.category, DelayCategory::BeforeMin);
    }

    #[test]
    fn test_evaluate_minutes_invalid_yields_unknown() {
        assert_eq!(
            evaluate_minutes(ago(10), 120.0, 30.0, now()),
            DelayState::unknown()
        );
        assert_eq!(
            evaluate_minutes(ago(10), -5.0, 30.0, now()),
            DelayState::unknown()
        );
        assert_eq!(
            evaluate_minutes(ago(10), 0.0, f64::NAN, now()),
            DelayState::unknown()
        );
    }
}
