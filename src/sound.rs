use std::io::{self, Write};

use crate::surface::{ChimeNote, SoundSurface};

const BELL: &[u8] = b"\x07";

/// Sound cues rendered as the terminal bell.
///
/// The bell has no pitch, so every cue is a single BEL. Per-second ticks are
/// silent unless `tick_bell` is set.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
    tick_bell: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(tick_bell: bool) -> Self {
        Self::new(io::stdout(), tick_bell)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, tick_bell: bool) -> Self {
        Self { out, tick_bell }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, cue: &'static str) {
        let result = self.out.write_all(BELL).and_then(|_| self.out.flush());
        if let Err(err) = result {
            tracing::warn!(cue, error = %err, "failed to play sound cue");
        }
    }
}

impl<W: Write> SoundSurface for TerminalBell<W> {
    fn tick(&mut self) {
        if self.tick_bell {
            self.ring("tick");
        }
    }

    fn urgent(&mut self) {
        self.ring("urgent");
    }

    fn complete(&mut self, note: ChimeNote) {
        tracing::trace!(note = note.index, hz = note.frequency_hz, "chime");
        self.ring("complete");
    }
}
