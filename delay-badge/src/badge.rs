//! Badge view
//!
//! Turns a [`DelayState`] into what a host UI shows: label text, color and
//! tooltip text. Clock formatting and translation are injected so the same
//! state renders in any locale or time zone.

use chrono::{DateTime, Utc};
use delay_common::{
    ColorHint, DelayCategory, DelayState, DelayWindow, TIME_PARAM, TooltipLine, evaluate,
};
use serde::Serialize;

use crate::clock::ClockFormatter;
use crate::i18n::{NO_DATA_KEY, Translator};

/// Separator between tooltip lines
pub const TOOLTIP_LINE_SEPARATOR: &str = "\n";

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

/// Rendered badge, ready for a host UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeView {
    /// Evaluated delay category
    pub category: DelayCategory,
    /// Countdown such as `~20m`, or `?` without one
    pub label: String,
    /// Color hint derived from the category
    pub color: ColorHint,
    /// Translated tooltip lines joined by newlines; `None` for never-seen entities
    pub tooltip: Option<String>,
}

impl BadgeView {
    /// Render a delay state with the given clock and translator
    pub fn render(
        state: &DelayState,
        clock: &impl ClockFormatter,
        translator: &impl Translator,
    ) -> Self {
        Self {
            category: state.category,
            label: state.label(),
            color: state.color(),
            tooltip: state
                .tooltip
                .as_deref()
                .map(|lines| tooltip_text(lines, clock, translator)),
        }
    }

    /// Fill in the generic "no data" tooltip for never-seen entities
    pub fn with_no_data_tooltip(mut self, translator: &impl Translator) -> Self {
        if self.category == DelayCategory::Unknown && self.tooltip.is_none() {
            self.tooltip = Some(translator.translate(NO_DATA_KEY, &[]));
        }
        self
    }

    /// Label wrapped in a bold 24-bit ANSI color sequence
    pub fn ansi_label(&self) -> String {
        let (r, g, b) = self.color.rgb();
        format!("\x1b[1;38;2;{};{};{}m{}{}", r, g, b, self.label, ANSI_RESET)
    }
}

/// Evaluate and render in one step
pub fn render_badge(
    last_seen_at: Option<DateTime<Utc>>,
    window: &DelayWindow,
    now: DateTime<Utc>,
    clock: &impl ClockFormatter,
    translator: &impl Translator,
) -> BadgeView {
    BadgeView::render(&evaluate(last_seen_at, window, now), clock, translator)
}

/// Translate tooltip lines and join them
pub fn tooltip_text(
    lines: &[TooltipLine],
    clock: &impl ClockFormatter,
    translator: &impl Translator,
) -> String {
    lines
        .iter()
        .map(|line| match line.time() {
            Some(at) => {
                let time = clock.format_clock(at);
                translator.translate(line.key(), &[(TIME_PARAM, time.as_str())])
            }
            None => translator.translate(line.key(), &[]),
        })
        .collect::<Vec<_>>()
        .join(TOOLTIP_LINE_SEPARATOR)
}
