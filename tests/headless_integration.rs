use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use kuromi::clock::FixedClock;
use kuromi::config::Config;
use kuromi::keymap::{command_for_key, Command, KeyContext};
use kuromi::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use kuromi::session::{FocusSession, COMPLETION_WINDOW};
use kuromi::surface::{RecordedPresentation, RecordedSound, StatusKey};
use kuromi::timer::TimerState;
use kuromi::view::TimerView;

type Session<P> = FocusSession<P, RecordedSound, FixedClock>;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    )
}

fn config(seconds: u64) -> Config {
    Config {
        hours: 0,
        minutes: 0,
        seconds,
        ..Config::default()
    }
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Headless integration using the runtime + FocusSession without a TTY.
// Key events come through Runner/TestEventSource; time is simulated by
// advancing a virtual instant one second per Tick.
#[test]
fn headless_space_runs_session_to_completion() {
    let t0 = Instant::now();
    let mut session: Session<RecordedPresentation> = FocusSession::new(
        &config(3),
        RecordedPresentation::default(),
        RecordedSound::default(),
        clock(),
        t0,
    );

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    tx.send(key(KeyCode::Char(' '))).unwrap();

    let mut now = t0;
    for _ in 0..20u32 {
        match runner.step() {
            AppEvent::Key(k) => {
                if command_for_key(k, KeyContext::default()) == Some(Command::Toggle) {
                    session.toggle(now);
                }
            }
            AppEvent::Resize => {}
            AppEvent::Tick => {
                now += Duration::from_secs(1);
                session.poll(now);
            }
        }
        if session.state() == TimerState::Completed {
            break;
        }
    }

    assert_eq!(session.state(), TimerState::Completed);
    assert_eq!(session.stats().stats().completed_sessions, 1);
    assert_eq!(session.stats().stats().total_study_time, 3);
    assert_eq!(
        session.presentation().last_status(),
        Some(StatusKey::Completed)
    );

    session.poll(now + COMPLETION_WINDOW);
    assert_eq!(session.state(), TimerState::Ready);
    assert_eq!(session.sound().chime, vec![0, 1, 2, 3]);
}

#[test]
fn headless_pause_holds_remaining_time() {
    let t0 = Instant::now();
    let mut session: Session<TimerView> = FocusSession::new(
        &config(90),
        TimerView::default(),
        RecordedSound::default(),
        clock(),
        t0,
    );

    session.start(t0);
    let mut now = t0;
    for _ in 0..30 {
        now += Duration::from_secs(1);
        session.poll(now);
    }
    assert_eq!(session.presentation().countdown, "01:00");

    session.pause(now);
    session.poll(now + Duration::from_secs(600));
    assert_eq!(session.presentation().countdown, "01:00");
    assert_eq!(session.presentation().status, StatusKey::Paused);

    session.start(now + Duration::from_secs(600));
    session.poll(now + Duration::from_secs(601));
    assert_eq!(session.presentation().countdown, "00:59");
}

#[test]
fn headless_streak_across_days() {
    let t0 = Instant::now();
    let clock = clock();
    let mut session: Session<TimerView> =
        FocusSession::new(&config(1), TimerView::default(), RecordedSound::default(), clock, t0);

    let mut now = t0;
    for day in 0..3 {
        if day > 0 {
            session.clock().advance(chrono::Duration::days(1));
        }
        session.start(now);
        now += Duration::from_secs(1);
        session.poll(now);
        now += COMPLETION_WINDOW;
        session.poll(now);
    }

    assert_eq!(session.presentation().stats.completed, 3);
    assert_eq!(session.presentation().stats.streak, 3);

    // Three idle days break the streak the next time stats are read.
    session.clock().advance(chrono::Duration::days(3));
    session.start(now);
    session.stop(now);
    assert_eq!(session.presentation().stats.streak, 0);
    assert_eq!(session.presentation().stats.completed, 3);
}

#[test]
fn headless_zero_duration_is_rejected() {
    let t0 = Instant::now();
    let mut session: Session<TimerView> = FocusSession::new(
        &config(0),
        TimerView::default(),
        RecordedSound::default(),
        clock(),
        t0,
    );

    session.toggle(t0);
    assert_eq!(session.state(), TimerState::Ready);
    let note = session.presentation().notification.clone().unwrap();
    assert_eq!(note.message, "Please set a time greater than 0!");

    session.poll(t0 + Duration::from_secs(3));
    assert!(session.presentation().notification.is_none());
}
