use ratatui::style::Color;

use kuromi::surface::{NotificationKind, StatusKey};

/// Colours for one theme. Light is the pastel default, dark swaps in deep
/// purples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub gauge: Color,
    pub urgent: Color,
    pub success: Color,
    pub error: Color,
}

const LIGHT: Palette = Palette {
    fg: Color::Rgb(74, 44, 90),
    bg: Color::Rgb(255, 240, 250),
    accent: Color::Rgb(214, 92, 170),
    muted: Color::Rgb(150, 120, 160),
    gauge: Color::Rgb(186, 104, 200),
    urgent: Color::Rgb(220, 50, 90),
    success: Color::Rgb(60, 150, 90),
    error: Color::Rgb(200, 40, 60),
};

const DARK: Palette = Palette {
    fg: Color::Rgb(236, 220, 245),
    bg: Color::Rgb(28, 18, 38),
    accent: Color::Rgb(255, 121, 198),
    muted: Color::Rgb(130, 110, 150),
    gauge: Color::Rgb(189, 147, 249),
    urgent: Color::Rgb(255, 85, 85),
    success: Color::Rgb(80, 250, 123),
    error: Color::Rgb(255, 85, 85),
};

impl Palette {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            DARK
        } else {
            LIGHT
        }
    }

    pub fn status(&self, status: StatusKey) -> Color {
        match status {
            StatusKey::Ready | StatusKey::Paused => self.muted,
            StatusKey::Running => self.accent,
            StatusKey::Urgent => self.urgent,
            StatusKey::Completed => self.success,
        }
    }

    pub fn notification(&self, kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Info => self.accent,
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
        }
    }
}
