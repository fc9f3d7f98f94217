//! The main loop's time base. [`Runner`] turns terminal input and idle gaps
//! into [`AppEvent`]s; every `Tick` it yields is also the moment the session
//! polls the [`Scheduler`]. Both live here because the scheduler has no clock
//! of its own and only advances when the runner ticks.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::surface::NotificationId;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                // Windows reports both press and release; only act on presses.
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(error = %err, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

// ── Scheduler ────────────────────────────────────────────────────────

/// Periodic activities. At most one of each kind is ever scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// Per-second decrement of a running countdown.
    Countdown,
    /// Live wall-clock refresh while no countdown is active.
    Clock,
}

/// One-shot callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    CompletionWindowElapsed { session: u64 },
    ChimeNote(usize),
    DismissNotification(NotificationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    Driver(Driver),
    Deferred(Deferred),
}

#[derive(Debug, Clone, Copy)]
struct Periodic {
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Clone, Copy)]
struct OneShot {
    due: Instant,
    seq: u64,
    what: Deferred,
}

/// Cancellable timers for the single-threaded main loop.
///
/// Nothing fires on its own; the owner polls [`Scheduler::pop_due`] with the
/// current instant and handles whatever comes back, one item at a time, so a
/// cancellation made while handling one item applies to the rest.
#[derive(Debug, Default)]
pub struct Scheduler {
    periodic: HashMap<Driver, Periodic>,
    one_shots: Vec<OneShot>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start `driver`, first firing one `period` after `now`. Any driver of
    /// the same kind is replaced.
    pub fn start_periodic(&mut self, driver: Driver, period: Duration, now: Instant) {
        self.periodic.insert(
            driver,
            Periodic {
                period,
                next_due: now + period,
            },
        );
    }

    /// Idempotent. Returns whether a driver was actually running.
    pub fn cancel(&mut self, driver: Driver) -> bool {
        self.periodic.remove(&driver).is_some()
    }

    pub fn is_active(&self, driver: Driver) -> bool {
        self.periodic.contains_key(&driver)
    }

    pub fn schedule_once(&mut self, what: Deferred, delay: Duration, now: Instant) {
        self.seq += 1;
        self.one_shots.push(OneShot {
            due: now + delay,
            seq: self.seq,
            what,
        });
    }

    pub fn pending_one_shots(&self) -> usize {
        self.one_shots.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let periodic = self.periodic.values().map(|p| p.next_due);
        let once = self.one_shots.iter().map(|o| o.due);
        periodic.chain(once).min()
    }

    /// Earliest item due at or before `now`. Periodic drivers that fell behind
    /// fire once per call until they have caught up.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired> {
        let periodic = self
            .periodic
            .iter()
            .filter(|(_, p)| p.next_due <= now)
            .min_by_key(|(driver, p)| (p.next_due, **driver == Driver::Clock))
            .map(|(driver, p)| (*driver, p.next_due));

        let once = self
            .one_shots
            .iter()
            .enumerate()
            .filter(|(_, o)| o.due <= now)
            .min_by_key(|(_, o)| (o.due, o.seq))
            .map(|(idx, o)| (idx, o.due));

        match (periodic, once) {
            (Some((driver, due)), Some((_, once_due))) if due <= once_due => {
                Some(self.fire_periodic(driver))
            }
            (Some((driver, _)), None) => Some(self.fire_periodic(driver)),
            (_, Some((idx, _))) => Some(Fired::Deferred(self.one_shots.remove(idx).what)),
            (None, None) => None,
        }
    }

    fn fire_periodic(&mut self, driver: Driver) -> Fired {
        if let Some(p) = self.periodic.get_mut(&driver) {
            p.next_due += p.period;
        }
        Fired::Driver(driver)
    }
}
