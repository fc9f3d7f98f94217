//! Narrow interfaces the focus session drives. The core never draws or plays
//! anything itself; it only calls into these.

use crate::clock::ClockFace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKey {
    Ready,
    Running,
    Paused,
    Completed,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// Identifier of a transient notification, used to dismiss it later.
pub type NotificationId = u64;

/// Renders timer state. Methods past `on_stats_update` have no-op defaults so
/// minimal surfaces (tests, headless runs) only implement the core four.
pub trait Presentation {
    fn on_display_update(&mut self, formatted_time: &str, progress_ratio: f64);
    fn on_status_change(&mut self, status: StatusKey);
    fn on_notification(&mut self, id: NotificationId, message: &str, kind: NotificationKind);
    fn on_stats_update(&mut self, formatted_total_time: &str, completed: u64, streak: u64);

    fn on_notification_dismissed(&mut self, _id: NotificationId) {}
    fn on_clock_update(&mut self, _face: &ClockFace) {}
    /// The countdown owns the screen; stop showing wall time until the next
    /// `on_clock_update`.
    fn on_clock_hidden(&mut self) {}
    fn on_inputs_enabled(&mut self, _enabled: bool) {}
    fn on_motivation(&mut self, _message: &str) {}
}

/// One voice of the completion chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimeNote {
    pub index: usize,
    pub frequency_hz: f64,
}

/// C5, E5, G5, C6.
pub const CHIME_FREQUENCIES_HZ: [f64; 4] = [523.25, 659.25, 783.99, 1046.50];

/// Gap between chime voices.
pub const CHIME_SPACING_MS: u64 = 150;

impl ChimeNote {
    pub fn all() -> impl Iterator<Item = ChimeNote> {
        CHIME_FREQUENCIES_HZ
            .iter()
            .enumerate()
            .map(|(index, &frequency_hz)| ChimeNote {
                index,
                frequency_hz,
            })
    }

    pub fn offset_ms(&self) -> u64 {
        self.index as u64 * CHIME_SPACING_MS
    }
}

/// Plays audio cues. Implementations must not fail loudly: a broken audio
/// path is logged and ignored.
pub trait SoundSurface {
    fn tick(&mut self);
    fn urgent(&mut self);
    fn complete(&mut self, note: ChimeNote);
}

/// Everything a [`Presentation`] was told, in order. Used by tests and
/// headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordedPresentation {
    pub displays: Vec<(String, f64)>,
    pub statuses: Vec<StatusKey>,
    pub notifications: Vec<(NotificationId, String, NotificationKind)>,
    pub dismissed: Vec<NotificationId>,
    pub stats: Vec<(String, u64, u64)>,
    pub clock_faces: Vec<ClockFace>,
    pub clock_hidden: usize,
    pub inputs_enabled: Vec<bool>,
    pub motivations: Vec<String>,
}

impl RecordedPresentation {
    pub fn last_display(&self) -> Option<&(String, f64)> {
        self.displays.last()
    }

    pub fn last_status(&self) -> Option<StatusKey> {
        self.statuses.last().copied()
    }

    pub fn errors(&self) -> usize {
        self.notifications
            .iter()
            .filter(|(_, _, kind)| *kind == NotificationKind::Error)
            .count()
    }
}

impl Presentation for RecordedPresentation {
    fn on_display_update(&mut self, formatted_time: &str, progress_ratio: f64) {
        self.displays.push((formatted_time.to_string(), progress_ratio));
    }

    fn on_status_change(&mut self, status: StatusKey) {
        self.statuses.push(status);
    }

    fn on_notification(&mut self, id: NotificationId, message: &str, kind: NotificationKind) {
        self.notifications.push((id, message.to_string(), kind));
    }

    fn on_stats_update(&mut self, formatted_total_time: &str, completed: u64, streak: u64) {
        self.stats
            .push((formatted_total_time.to_string(), completed, streak));
    }

    fn on_notification_dismissed(&mut self, id: NotificationId) {
        self.dismissed.push(id);
    }

    fn on_clock_update(&mut self, face: &ClockFace) {
        self.clock_faces.push(face.clone());
    }

    fn on_clock_hidden(&mut self) {
        self.clock_hidden += 1;
    }

    fn on_inputs_enabled(&mut self, enabled: bool) {
        self.inputs_enabled.push(enabled);
    }

    fn on_motivation(&mut self, message: &str) {
        self.motivations.push(message.to_string());
    }
}

/// Counts the cues it was asked to play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedSound {
    pub ticks: usize,
    pub urgents: usize,
    pub chime: Vec<usize>,
}

impl SoundSurface for RecordedSound {
    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn urgent(&mut self) {
        self.urgents += 1;
    }

    fn complete(&mut self, note: ChimeNote) {
        self.chime.push(note.index);
    }
}
