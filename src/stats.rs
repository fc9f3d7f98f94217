use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::display::format_total_time;

/// Days without a completed session after which the streak is dropped.
pub const STREAK_GRACE_DAYS: i64 = 2;

/// Cumulative focus counters for the current process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Seconds of completed focus sessions.
    pub total_study_time: u64,
    pub completed_sessions: u64,
    pub current_streak: u64,
    pub last_session_date: Option<NaiveDate>,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub formatted_total_time: String,
    pub completed_sessions: u64,
    pub current_streak: u64,
}

/// Owner of [`SessionStats`].
///
/// Stats start at zero on every launch; nothing is written to disk.
#[derive(Debug, Default)]
pub struct StatsStore {
    stats: SessionStats,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: SessionStats) -> Self {
        Self { stats }
    }

    /// Raw counters, without applying streak decay.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Credit a completed session. The configured duration is credited, not
    /// the wall time it took.
    pub fn record_completion(&mut self, duration_secs: u64, today: NaiveDate) {
        self.stats.completed_sessions += 1;
        self.stats.current_streak += 1;
        self.stats.total_study_time += duration_secs;
        self.stats.last_session_date = Some(today);
        tracing::info!(
            duration_secs,
            completed = self.stats.completed_sessions,
            streak = self.stats.current_streak,
            "session recorded"
        );
    }

    /// Stats for display. Reading applies streak decay and may reset the
    /// stored streak.
    pub fn current_view(&mut self, today: NaiveDate) -> StatsView {
        self.apply_streak_decay(today);
        StatsView {
            formatted_total_time: format_total_time(self.stats.total_study_time),
            completed_sessions: self.stats.completed_sessions,
            current_streak: self.stats.current_streak,
        }
    }

    fn apply_streak_decay(&mut self, today: NaiveDate) {
        let idle_days = match self.stats.last_session_date {
            Some(last) => (today - last).num_days(),
            None => i64::MAX,
        };

        if idle_days > STREAK_GRACE_DAYS && self.stats.current_streak != 0 {
            tracing::debug!(
                idle_days,
                streak = self.stats.current_streak,
                "streak expired"
            );
            self.stats.current_streak = 0;
        }
    }
}
