//! Focus (pomodoro) sessions

pub mod timer;

pub use timer::{format_clock, FocusTimer, TickOutcome, TimerState, DEFAULT_DURATION_SECS};
