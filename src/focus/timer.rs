//! Focus session countdown
//!
//! ```text
//!            start()            pause()
//!   Idle ─────────────▶ Running ───────▶ Paused
//!    ▲                   │  ▲   resume()   │
//!    │ reset() /         │  └──────────────┘
//!    │ complete_session()│
//!    └───────────────────┘
//! ```
//!
//! The store never reads a clock. Something outside calls [`FocusTimer::advance`]
//! (or [`FocusTimer::tick`]) once per elapsed second.

use serde::{Deserialize, Serialize};

/// Default focus session length: 25 minutes
pub const DEFAULT_DURATION_SECS: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Result of a single [`FocusTimer::advance`] step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is idle or paused, nothing changed
    Inactive,
    Ticked { seconds_left: u32 },
    /// The countdown hit zero and the session was recorded
    Completed { completed_sessions: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTimer {
    state: TimerState,
    seconds_left: u32,
    duration_secs: u32,
    completed_sessions: u32,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

impl FocusTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            state: TimerState::Idle,
            seconds_left: duration_secs,
            duration_secs,
            completed_sessions: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    /// Start a fresh session from any state. A partially elapsed session is
    /// discarded.
    pub fn start(&mut self) {
        self.state = TimerState::Running;
        self.seconds_left = self.duration_secs;
    }

    /// Returns `false` (and does nothing) unless running
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        true
    }

    /// Returns `false` (and does nothing) unless paused
    pub fn resume(&mut self) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.seconds_left = self.duration_secs;
    }

    /// Count down one second while running, flooring at zero.
    ///
    /// Reaching zero does not complete the session; use [`Self::advance`] for
    /// that, or call [`Self::complete_session`] yourself.
    pub fn tick(&mut self) {
        if self.state == TimerState::Running {
            self.seconds_left = self.seconds_left.saturating_sub(1);
        }
    }

    /// Record a finished session and go back to idle, regardless of state
    pub fn complete_session(&mut self) {
        self.state = TimerState::Idle;
        self.seconds_left = self.duration_secs;
        self.completed_sessions += 1;
        log::info!("Focus session completed ({} total)", self.completed_sessions);
    }

    /// Tick and, if the countdown reached zero, complete the session in the
    /// same step.
    pub fn advance(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Inactive;
        }
        self.tick();
        if self.seconds_left == 0 {
            self.complete_session();
            return TickOutcome::Completed {
                completed_sessions: self.completed_sessions,
            };
        }
        TickOutcome::Ticked {
            seconds_left: self.seconds_left,
        }
    }
}

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle_with_default_duration() {
        let timer = FocusTimer::default();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.seconds_left(), 1500);
        assert_eq!(timer.completed_sessions(), 0);
    }

    #[test]
    fn test_ticks_count_down_exactly() {
        for n in [0u32, 1, 7, 1499, 1500] {
            let mut timer = FocusTimer::default();
            timer.start();
            for _ in 0..n {
                timer.tick();
            }
            assert_eq!(timer.seconds_left(), 1500 - n);
        }
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut timer = FocusTimer::default();
        timer.start();
        for _ in 0..1501 {
            timer.tick();
        }
        assert_eq!(timer.seconds_left(), 0);
        timer.tick();
        assert_eq!(timer.seconds_left(), 0);
        assert!(timer.is_running());
        assert_eq!(timer.completed_sessions(), 0);
    }

    #[test]
    fn test_tick_ignored_when_idle_or_paused() {
        let mut timer = FocusTimer::new(60);
        timer.tick();
        assert_eq!(timer.seconds_left(), 60);

        timer.start();
        timer.tick();
        assert!(timer.pause());
        for _ in 0..10 {
            timer.tick();
        }
        assert_eq!(timer.seconds_left(), 59);

        assert!(timer.resume());
        timer.tick();
        assert_eq!(timer.seconds_left(), 58);
    }

    #[test]
    fn test_pause_and_resume_guards() {
        let mut timer = FocusTimer::new(60);
        assert!(!timer.pause());
        assert!(!timer.resume());
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start();
        assert!(!timer.resume());
        assert!(timer.pause());
        assert!(!timer.pause());
        assert!(timer.is_paused());
    }

    #[test]
    fn test_start_always_restarts_clock() {
        let mut timer = FocusTimer::new(60);
        timer.start();
        timer.tick();
        timer.tick();
        timer.pause();
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.seconds_left(), 60);
    }

    #[test]
    fn test_reset_discards_current_session() {
        let mut timer = FocusTimer::new(60);
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.seconds_left(), 60);
        assert_eq!(timer.completed_sessions(), 0);
    }

    #[test]
    fn test_complete_session_is_unconditional() {
        let mut timer = FocusTimer::new(60);
        timer.complete_session();
        assert_eq!(timer.completed_sessions(), 1);
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start();
        timer.tick();
        timer.complete_session();
        assert_eq!(timer.completed_sessions(), 2);
        assert_eq!(timer.seconds_left(), 60);
    }

    #[test]
    fn test_advance_completes_exactly_once() {
        let mut timer = FocusTimer::new(3);
        timer.start();
        assert_eq!(timer.advance(), TickOutcome::Ticked { seconds_left: 2 });
        assert_eq!(timer.advance(), TickOutcome::Ticked { seconds_left: 1 });
        assert_eq!(
            timer.advance(),
            TickOutcome::Completed {
                completed_sessions: 1
            }
        );
        // Back to idle, extra ticks are inert
        assert_eq!(timer.advance(), TickOutcome::Inactive);
        assert_eq!(timer.completed_sessions(), 1);
        assert_eq!(timer.seconds_left(), 3);
    }

    #[test]
    fn test_advance_inactive_while_paused() {
        let mut timer = FocusTimer::new(3);
        timer.start();
        timer.pause();
        assert_eq!(timer.advance(), TickOutcome::Inactive);
        assert_eq!(timer.seconds_left(), 3);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
    }
}
