//! Countdown state machine.
//!
//! The timer has no notion of wall time or threads. The owner calls
//! [`Timer::tick`] once per period while the timer is running and forwards
//! the returned [`TimerEvent`]s to whatever renders them.
//!
//! ```text
//! Ready --start--> Running --pause--> Paused --start--> Running
//! Running|Paused --stop--> Ready
//! Running --(remaining hits 0)--> Completed --(window elapsed)--> Ready
//! ```

use serde::{Deserialize, Serialize};

use crate::display::progress_ratio;
use crate::error::TimerError;

/// Remaining-time threshold (inclusive) for the urgent cue.
pub const URGENT_THRESHOLD_SECS: u64 = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimerState {
    #[default]
    Ready,
    Running,
    Paused,
    Completed,
}

/// Duration requested by the user, split the way the input fields show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimerConfig {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Split a preset duration into normalized fields.
    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

/// Things that happened as a result of a command or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started {
        remaining_secs: u64,
        original_secs: u64,
    },
    Resumed {
        remaining_secs: u64,
    },
    Paused {
        remaining_secs: u64,
    },
    Stopped,
    Tick {
        remaining_secs: u64,
    },
    Urgent {
        remaining_secs: u64,
    },
    Completed {
        duration_secs: u64,
        session: u64,
    },
    /// The completion display window closed and the timer is `Ready` again.
    Reset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timer {
    state: TimerState,
    remaining_secs: u64,
    original_secs: u64,
    /// Incremented on every fresh start so stale completion windows can be ignored.
    session: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn original_secs(&self) -> u64 {
        self.original_secs
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Running or paused: a countdown owns the display.
    pub fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    /// Configuration inputs are only editable (and only read) outside a session.
    pub fn accepts_config(&self) -> bool {
        !self.is_active()
    }

    pub fn is_urgent(&self) -> bool {
        self.state == TimerState::Running
            && self.remaining_secs > 0
            && self.remaining_secs <= URGENT_THRESHOLD_SECS
    }

    /// Seconds the countdown face should show for the given input configuration.
    pub fn display_secs(&self, configured: &TimerConfig) -> u64 {
        if self.is_active() {
            self.remaining_secs
        } else {
            configured.total_seconds()
        }
    }

    pub fn progress(&self) -> f64 {
        progress_ratio(self.original_secs, self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new session from `Ready`/`Completed`, or resume from `Paused`.
    ///
    /// Returns `Ok(None)` when already running.
    pub fn start(&mut self, config: &TimerConfig) -> Result<Option<TimerEvent>, TimerError> {
        match self.state {
            TimerState::Running => Ok(None),
            TimerState::Paused => {
                self.state = TimerState::Running;
                Ok(Some(TimerEvent::Resumed {
                    remaining_secs: self.remaining_secs,
                }))
            }
            TimerState::Ready | TimerState::Completed => {
                let total = config.total_seconds();
                if total == 0 {
                    return Err(TimerError::ZeroDuration);
                }
                self.original_secs = total;
                self.remaining_secs = total;
                self.session += 1;
                self.state = TimerState::Running;
                Ok(Some(TimerEvent::Started {
                    remaining_secs: total,
                    original_secs: total,
                }))
            }
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(TimerEvent::Paused {
            remaining_secs: self.remaining_secs,
        })
    }

    /// Abandon the session. A no-op from `Ready`.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        if self.state == TimerState::Ready {
            return None;
        }
        self.state = TimerState::Ready;
        self.remaining_secs = 0;
        Some(TimerEvent::Stopped)
    }

    /// One decrement period. Yields nothing unless running.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if self.state != TimerState::Running {
            return Vec::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == 0 {
            self.state = TimerState::Completed;
            return vec![TimerEvent::Completed {
                duration_secs: self.original_secs,
                session: self.session,
            }];
        }

        let mut events = vec![TimerEvent::Tick {
            remaining_secs: self.remaining_secs,
        }];
        if self.remaining_secs <= URGENT_THRESHOLD_SECS {
            events.push(TimerEvent::Urgent {
                remaining_secs: self.remaining_secs,
            });
        }
        events
    }

    /// Close the completion window of `session`. Ignored if a newer session
    /// started or the user already left `Completed`.
    pub fn finish_completion(&mut self, session: u64) -> Option<TimerEvent> {
        if self.state != TimerState::Completed || self.session != session {
            return None;
        }
        self.state = TimerState::Ready;
        Some(TimerEvent::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn running(secs: u64) -> Timer {
        let mut timer = Timer::new();
        timer
            .start(&TimerConfig::new(0, 0, secs))
            .expect("positive duration starts");
        timer
    }

    #[test]
    fn test_timer_config_total() {
        assert_eq!(TimerConfig::new(1, 2, 3).total_seconds(), 3723);
        assert_eq!(TimerConfig::default().total_seconds(), 0);
    }

    #[test]
    fn test_timer_config_from_total() {
        assert_eq!(
            TimerConfig::from_total_seconds(3723),
            TimerConfig::new(1, 2, 3)
        );
        assert_eq!(
            TimerConfig::from_total_seconds(25 * 60),
            TimerConfig::new(0, 25, 0)
        );
    }

    #[test]
    fn test_new_timer_is_ready() {
        let timer = Timer::new();
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.accepts_config());
    }

    #[test]
    fn test_start_sets_remaining_and_original() {
        for (h, m, s) in [(0, 0, 1), (0, 25, 0), (1, 30, 15), (2, 0, 59)] {
            let mut timer = Timer::new();
            let cfg = TimerConfig::new(h, m, s);
            let ev = timer.start(&cfg).unwrap();
            let expected = h * 3600 + m * 60 + s;
            assert_eq!(timer.state(), TimerState::Running);
            assert_eq!(timer.remaining_secs(), expected);
            assert_eq!(timer.original_secs(), expected);
            assert_matches!(ev, Some(TimerEvent::Started { remaining_secs, .. }) if remaining_secs == expected);
        }
    }

    #[test]
    fn test_start_with_zero_fails_without_state_change() {
        let mut timer = Timer::new();
        let err = timer.start(&TimerConfig::default()).unwrap_err();
        assert_eq!(err, TimerError::ZeroDuration);
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.session(), 0);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = running(30);
        timer.tick();
        let ev = timer.start(&TimerConfig::new(1, 0, 0)).unwrap();
        assert!(ev.is_none());
        assert_eq!(timer.remaining_secs(), 29);
        assert_eq!(timer.original_secs(), 30);
    }

    #[test]
    fn test_pause_then_start_resumes() {
        let mut timer = running(30);
        timer.tick();
        timer.tick();
        assert_matches!(
            timer.pause(),
            Some(TimerEvent::Paused { remaining_secs: 28 })
        );
        assert_eq!(timer.state(), TimerState::Paused);

        // Paused ignores a changed configuration.
        let ev = timer.start(&TimerConfig::new(0, 5, 0)).unwrap();
        assert_matches!(ev, Some(TimerEvent::Resumed { remaining_secs: 28 }));
        assert_eq!(timer.remaining_secs(), 28);
        assert_eq!(timer.original_secs(), 30);
    }

    #[test]
    fn test_pause_outside_running_is_noop() {
        let mut timer = Timer::new();
        assert!(timer.pause().is_none());

        let mut timer = running(5);
        timer.pause();
        assert!(timer.pause().is_none());
    }

    #[test]
    fn test_paused_does_not_tick() {
        let mut timer = running(10);
        timer.pause();
        assert!(timer.tick().is_empty());
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_stop_from_running_and_paused() {
        let mut timer = running(30);
        assert_matches!(timer.stop(), Some(TimerEvent::Stopped));
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.accepts_config());

        let mut timer = running(30);
        timer.pause();
        assert_matches!(timer.stop(), Some(TimerEvent::Stopped));
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_stop_from_ready_is_noop() {
        let mut timer = Timer::new();
        assert!(timer.stop().is_none());
    }

    #[test]
    fn test_tick_decrements_by_one_until_completed() {
        let mut timer = running(25);
        for expected in (1..25).rev() {
            timer.tick();
            assert_eq!(timer.remaining_secs(), expected);
            assert_eq!(timer.state(), TimerState::Running);
        }
        let events = timer.tick();
        assert_eq!(timer.remaining_secs(), 0);
        assert_eq!(timer.state(), TimerState::Completed);
        assert_matches!(
            events.as_slice(),
            [TimerEvent::Completed {
                duration_secs: 25,
                ..
            }]
        );

        // No further movement once completed.
        assert!(timer.tick().is_empty());
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_urgent_fires_only_inside_window() {
        let mut timer = running(15);
        let mut urgent_at = Vec::new();
        let mut tick_at = Vec::new();
        while timer.state() == TimerState::Running {
            for ev in timer.tick() {
                match ev {
                    TimerEvent::Urgent { remaining_secs } => urgent_at.push(remaining_secs),
                    TimerEvent::Tick { remaining_secs } => tick_at.push(remaining_secs),
                    _ => {}
                }
            }
        }
        assert_eq!(urgent_at, (1..=10).rev().collect::<Vec<_>>());
        assert_eq!(tick_at, (1..=14).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_progress_ratio_over_session() {
        let mut timer = running(4);
        assert_eq!(timer.progress(), 0.0);
        timer.tick();
        assert_eq!(timer.progress(), 0.25);
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_display_secs_follows_state() {
        let cfg = TimerConfig::new(0, 1, 0);
        let mut timer = Timer::new();
        assert_eq!(timer.display_secs(&cfg), 60);

        timer.start(&TimerConfig::new(0, 0, 30)).unwrap();
        timer.tick();
        assert_eq!(timer.display_secs(&cfg), 29);

        timer.pause();
        assert_eq!(timer.display_secs(&cfg), 29);

        timer.stop();
        assert_eq!(timer.display_secs(&cfg), 60);
    }

    #[test]
    fn test_finish_completion_returns_to_ready() {
        let mut timer = running(1);
        let session = timer.session();
        timer.tick();
        assert_eq!(timer.state(), TimerState::Completed);
        assert!(timer.accepts_config());
        assert_matches!(timer.finish_completion(session), Some(TimerEvent::Reset));
        assert_eq!(timer.state(), TimerState::Ready);
    }

    #[test]
    fn test_stale_completion_window_is_ignored() {
        let mut timer = running(1);
        let first = timer.session();
        timer.tick();

        // A new session starts before the first window closes.
        timer.start(&TimerConfig::new(0, 0, 5)).unwrap();
        assert!(timer.finish_completion(first).is_none());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn test_start_from_completed_reads_config() {
        let mut timer = running(1);
        timer.tick();
        timer.start(&TimerConfig::new(0, 0, 7)).unwrap();
        assert_eq!(timer.remaining_secs(), 7);
        assert_eq!(timer.original_secs(), 7);
    }

    #[test]
    fn test_timer_state_display() {
        assert_eq!(TimerState::Ready.to_string(), "ready");
        assert_eq!(TimerState::Completed.to_string(), "completed");
    }
}
