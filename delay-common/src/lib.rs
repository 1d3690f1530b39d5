//! Delay Common Library
//!
//! Pure delay-window evaluation for the delay badge: given when an entity was
//! last seen and the window in which it is expected to reappear, derive what
//! the badge should show.

mod evaluate;
pub mod state;
pub mod time;
pub mod window;

pub use evaluate::{evaluate, evaluate_minutes};
pub use state::{
    APPROX_PREFIX, ColorHint, DelayCategory, DelayState, RemainingTime, TIME_PARAM, TooltipLine,
    UNKNOWN_GLYPH,
};
pub use window::{DelayWindow, DelayWindowError, validate_delay_window};

