use chrono::{Local, NaiveDateTime, Timelike};
use std::cell::Cell;

/// Source of local wall-clock time.
pub trait ClockSource {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and headless runs.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Everything the live clock panel needs for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    pub digital: String,
    /// Degrees clockwise from twelve o'clock.
    pub hour_angle: f64,
    pub minute_angle: f64,
    pub second_angle: f64,
}

impl ClockFace {
    pub fn at(time: NaiveDateTime) -> Self {
        let (hour, minute, second) = (time.hour(), time.minute(), time.second());
        Self {
            digital: format!("{hour:02}:{minute:02}:{second:02}"),
            hour_angle: f64::from(hour % 12) * 30.0 + f64::from(minute) * 0.5,
            minute_angle: f64::from(minute) * 6.0,
            second_angle: f64::from(second) * 6.0,
        }
    }
}
