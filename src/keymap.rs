use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::inputs::Field;

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Start, pause or resume depending on the timer state.
    Toggle,
    Stop,
    ToggleSettings,
    /// Move input focus to the next duration field.
    FocusNext,
    Unfocus,
    Type(Field, char),
    Erase(Field),
    /// Zero-based index into the configured presets.
    Preset(usize),
    ToggleSound,
    ToggleDarkMode,
}

/// Where keyboard input currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyContext {
    pub focused: Option<Field>,
    pub settings_open: bool,
}

fn preset_index(c: char) -> Option<usize> {
    match c {
        '1'..='9' => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

pub fn command_for_key(key: KeyEvent, ctx: KeyContext) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('s') => Some(Command::ToggleSettings),
            _ => None,
        };
    }

    // Escape always stops, whatever has focus.
    if key.code == KeyCode::Esc {
        return Some(Command::Stop);
    }

    if ctx.settings_open {
        return match key.code {
            KeyCode::Char('s') => Some(Command::ToggleSound),
            KeyCode::Char('d') => Some(Command::ToggleDarkMode),
            KeyCode::Char(c) => preset_index(c).map(Command::Preset),
            _ => None,
        };
    }

    match (key.code, ctx.focused) {
        (KeyCode::Tab, _) => Some(Command::FocusNext),
        (KeyCode::Enter, Some(_)) => Some(Command::Unfocus),
        (KeyCode::Backspace, Some(field)) => Some(Command::Erase(field)),
        (KeyCode::Char(c), Some(field)) if c.is_ascii_digit() => Some(Command::Type(field, c)),
        // Space inside a text field is swallowed.
        (KeyCode::Char(_), Some(_)) => None,
        (KeyCode::Char(' '), None) => Some(Command::Toggle),
        (KeyCode::Char('q'), None) => Some(Command::Quit),
        (KeyCode::Char(c), None) => preset_index(c).map(Command::Preset),
        _ => None,
    }
}
