//! The state the terminal UI draws from. The session pushes into it through
//! [`Presentation`]; the widget only reads.

use crate::clock::ClockFace;
use crate::messages::status_message;
use crate::surface::{NotificationId, NotificationKind, Presentation, StatusKey};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsLine {
    pub total_time: String,
    pub completed: u64,
    pub streak: u64,
}

#[derive(Debug, Clone)]
pub struct TimerView {
    pub countdown: String,
    pub progress: f64,
    pub status: StatusKey,
    pub notification: Option<Notification>,
    pub stats: StatsLine,
    pub clock: Option<ClockFace>,
    pub inputs_enabled: bool,
    pub motivation: String,
}

impl Default for TimerView {
    fn default() -> Self {
        Self {
            countdown: "00:00".to_string(),
            progress: 0.0,
            status: StatusKey::Ready,
            notification: None,
            stats: StatsLine::default(),
            clock: None,
            inputs_enabled: true,
            motivation: String::new(),
        }
    }
}

impl TimerView {
    pub fn status_text(&self) -> &'static str {
        status_message(self.status)
    }
}

impl Presentation for TimerView {
    fn on_display_update(&mut self, formatted_time: &str, progress_ratio: f64) {
        self.countdown = formatted_time.to_string();
        self.progress = progress_ratio;
    }

    fn on_status_change(&mut self, status: StatusKey) {
        self.status = status;
    }

    fn on_notification(&mut self, id: NotificationId, message: &str, kind: NotificationKind) {
        self.notification = Some(Notification {
            id,
            message: message.to_string(),
            kind,
        });
    }

    fn on_stats_update(&mut self, formatted_total_time: &str, completed: u64, streak: u64) {
        self.stats = StatsLine {
            total_time: formatted_total_time.to_string(),
            completed,
            streak,
        };
    }

    fn on_notification_dismissed(&mut self, id: NotificationId) {
        // A newer notification replaced this one; leave it up.
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
        }
    }

    fn on_clock_update(&mut self, face: &ClockFace) {
        self.clock = Some(face.clone());
    }

    fn on_clock_hidden(&mut self) {
        self.clock = None;
    }

    fn on_inputs_enabled(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
    }

    fn on_motivation(&mut self, message: &str) {
        self.motivation = message.to_string();
    }
}
