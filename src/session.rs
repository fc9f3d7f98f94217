//! The focus session: one explicit object that owns the timer, its inputs,
//! the stats store and the scheduler, and drives the surfaces.
//!
//! Every entry point takes the current monotonic instant so the whole
//! pipeline can be driven deterministically from tests.

use std::time::{Duration, Instant};

use crate::clock::{ClockFace, ClockSource};
use crate::config::{Config, Settings};
use crate::display::format_countdown;
use crate::inputs::{ConfigInputs, Field};
use crate::messages::{random_motivation, SESSION_COMPLETE};
use crate::runtime::{Deferred, Driver, Fired, Scheduler};
use crate::stats::StatsStore;
use crate::surface::{
    ChimeNote, NotificationId, NotificationKind, Presentation, SoundSurface, StatusKey,
};
use crate::timer::{Timer, TimerConfig, TimerEvent, TimerState, URGENT_THRESHOLD_SECS};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);
/// How long `Completed` is shown before the timer returns to `Ready`.
pub const COMPLETION_WINDOW: Duration = Duration::from_secs(3);
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub struct FocusSession<P: Presentation, S: SoundSurface, C: ClockSource> {
    timer: Timer,
    stats: StatsStore,
    inputs: ConfigInputs,
    settings: Settings,
    scheduler: Scheduler,
    presentation: P,
    sound: S,
    clock: C,
    status: Option<StatusKey>,
    next_notification: NotificationId,
}

impl<P: Presentation, S: SoundSurface, C: ClockSource> FocusSession<P, S, C> {
    pub fn new(config: &Config, presentation: P, sound: S, clock: C, now: Instant) -> Self {
        let mut session = Self {
            timer: Timer::new(),
            stats: StatsStore::new(),
            inputs: ConfigInputs::new(&config.timer_config()),
            settings: config.settings(),
            scheduler: Scheduler::new(),
            presentation,
            sound,
            clock,
            status: None,
            next_notification: 0,
        };

        session.presentation.on_inputs_enabled(true);
        session.set_status(StatusKey::Ready);
        session.refresh_display();
        session.refresh_stats();
        session.start_clock(now);
        session.presentation.on_motivation(random_motivation());
        session
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    pub fn inputs(&self) -> &ConfigInputs {
        &self.inputs
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: Instant) {
        let config = self.inputs.timer_config();
        match self.timer.start(&config) {
            Ok(Some(event)) => self.dispatch(event, now),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(error = %err, "start rejected");
                self.notify(&err.to_string(), NotificationKind::Error, now);
            }
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(event) = self.timer.pause() {
            self.dispatch(event, now);
        }
    }

    pub fn stop(&mut self, now: Instant) {
        if let Some(event) = self.timer.stop() {
            self.dispatch(event, now);
        }
    }

    /// Space bar behaviour: pause a running countdown, otherwise start/resume.
    pub fn toggle(&mut self, now: Instant) {
        if self.timer.state() == TimerState::Running {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    /// Load a preset into the inputs. Rejected while running.
    pub fn set_preset(&mut self, total_secs: u64) -> bool {
        if self.timer.state() == TimerState::Running {
            tracing::debug!(total_secs, "preset ignored while running");
            return false;
        }
        self.inputs.set(&TimerConfig::from_total_seconds(total_secs));
        self.refresh_display();
        true
    }

    pub fn type_char(&mut self, field: Field, c: char) -> bool {
        if !self.timer.accepts_config() || !c.is_ascii_digit() {
            return false;
        }
        let changed = self.inputs.push(field, c);
        if changed {
            self.refresh_display();
        }
        changed
    }

    pub fn erase_char(&mut self, field: Field) -> bool {
        if !self.timer.accepts_config() {
            return false;
        }
        let changed = self.inputs.backspace(field);
        if changed {
            self.refresh_display();
        }
        changed
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        tracing::info!(enabled = self.settings.sound_enabled, "sound toggled");
        self.settings.sound_enabled
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.dark_mode = !self.settings.dark_mode;
        tracing::info!(enabled = self.settings.dark_mode, "dark mode toggled");
        self.settings.dark_mode
    }

    /// Run everything the scheduler has due at `now`.
    pub fn poll(&mut self, now: Instant) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.handle(fired, now);
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn handle(&mut self, fired: Fired, now: Instant) {
        match fired {
            Fired::Driver(Driver::Countdown) => self.on_countdown_tick(now),
            Fired::Driver(Driver::Clock) => {
                if self.timer.is_active() {
                    self.stop_clock();
                } else {
                    self.refresh_clock();
                }
            }
            Fired::Deferred(Deferred::CompletionWindowElapsed { session }) => {
                if let Some(event) = self.timer.finish_completion(session) {
                    self.dispatch(event, now);
                }
            }
            Fired::Deferred(Deferred::ChimeNote(index)) => {
                if self.settings.sound_enabled {
                    if let Some(note) = ChimeNote::all().nth(index) {
                        self.sound.complete(note);
                    }
                }
            }
            Fired::Deferred(Deferred::DismissNotification(id)) => {
                self.presentation.on_notification_dismissed(id);
            }
        }
    }

    fn on_countdown_tick(&mut self, now: Instant) {
        if self.timer.state() != TimerState::Running {
            self.scheduler.cancel(Driver::Countdown);
            return;
        }

        let events = self.timer.tick();
        self.presentation.on_display_update(
            &format_countdown(self.timer.remaining_secs()),
            self.timer.progress(),
        );
        for event in events {
            self.dispatch(event, now);
        }
    }

    fn dispatch(&mut self, event: TimerEvent, now: Instant) {
        tracing::debug!(?event, "timer event");
        match event {
            TimerEvent::Started { .. } => {
                self.stop_clock();
                self.scheduler
                    .start_periodic(Driver::Countdown, TICK_PERIOD, now);
                self.set_inputs_enabled(false);
                self.set_status(StatusKey::Running);
                self.refresh_display();
                self.presentation.on_motivation(random_motivation());
            }
            TimerEvent::Resumed { .. } => {
                self.scheduler
                    .start_periodic(Driver::Countdown, TICK_PERIOD, now);
                self.set_status(StatusKey::Running);
                self.refresh_display();
            }
            TimerEvent::Paused { .. } => {
                self.scheduler.cancel(Driver::Countdown);
                self.set_status(StatusKey::Paused);
                self.refresh_display();
            }
            TimerEvent::Stopped => {
                self.scheduler.cancel(Driver::Countdown);
                self.set_inputs_enabled(true);
                self.set_status(StatusKey::Ready);
                self.refresh_display();
                self.refresh_stats();
                self.start_clock(now);
                self.presentation.on_motivation(random_motivation());
            }
            TimerEvent::Tick { remaining_secs } => {
                if self.settings.sound_enabled {
                    self.sound.tick();
                }
                if remaining_secs > URGENT_THRESHOLD_SECS {
                    self.set_status(StatusKey::Running);
                }
            }
            TimerEvent::Urgent { .. } => {
                if self.settings.sound_enabled {
                    self.sound.urgent();
                }
                self.set_status(StatusKey::Urgent);
            }
            TimerEvent::Completed {
                duration_secs,
                session,
            } => {
                self.scheduler.cancel(Driver::Countdown);
                let today = self.clock.now().date();
                self.stats.record_completion(duration_secs, today);
                self.set_inputs_enabled(true);
                self.set_status(StatusKey::Completed);
                self.refresh_stats();
                for note in ChimeNote::all() {
                    self.scheduler.schedule_once(
                        Deferred::ChimeNote(note.index),
                        Duration::from_millis(note.offset_ms()),
                        now,
                    );
                }
                self.notify(SESSION_COMPLETE, NotificationKind::Success, now);
                self.scheduler.schedule_once(
                    Deferred::CompletionWindowElapsed { session },
                    COMPLETION_WINDOW,
                    now,
                );
                self.start_clock(now);
            }
            TimerEvent::Reset => {
                self.set_status(StatusKey::Ready);
                self.refresh_display();
                self.refresh_stats();
                self.presentation.on_motivation(random_motivation());
            }
        }
    }

    fn set_status(&mut self, status: StatusKey) {
        if self.status != Some(status) {
            self.status = Some(status);
            self.presentation.on_status_change(status);
        }
    }

    fn set_inputs_enabled(&mut self, enabled: bool) {
        self.inputs.set_enabled(enabled);
        self.presentation.on_inputs_enabled(enabled);
    }

    fn refresh_display(&mut self) {
        let secs = self.timer.display_secs(&self.inputs.timer_config());
        let ratio = match self.timer.state() {
            TimerState::Ready => 0.0,
            _ => self.timer.progress(),
        };
        self.presentation
            .on_display_update(&format_countdown(secs), ratio);
    }

    fn refresh_stats(&mut self) {
        let today = self.clock.now().date();
        let view = self.stats.current_view(today);
        self.presentation.on_stats_update(
            &view.formatted_total_time,
            view.completed_sessions,
            view.current_streak,
        );
    }

    fn refresh_clock(&mut self) {
        let face = ClockFace::at(self.clock.now());
        self.presentation.on_clock_update(&face);
    }

    fn stop_clock(&mut self) {
        self.scheduler.cancel(Driver::Clock);
        self.presentation.on_clock_hidden();
    }

    fn start_clock(&mut self, now: Instant) {
        self.refresh_clock();
        self.scheduler
            .start_periodic(Driver::Clock, CLOCK_PERIOD, now);
    }

    fn notify(&mut self, message: &str, kind: NotificationKind, now: Instant) {
        self.next_notification += 1;
        let id = self.next_notification;
        self.presentation.on_notification(id, message, kind);
        self.scheduler
            .schedule_once(Deferred::DismissNotification(id), NOTIFICATION_TTL, now);
    }
}
