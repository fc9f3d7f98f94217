mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kuromi::{
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    inputs::Field,
    keymap::{command_for_key, Command, KeyContext},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::FocusSession,
    sound::TerminalBell,
    view::TimerView,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
    time::{Duration, Instant},
};

/// Input poll interval. The scheduler is polled at this rate, so it bounds
/// how late a countdown second or chime note can fire.
const TICK_RATE_MS: u64 = 50;

/// a cute focus timer for your terminal
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "A focus timer TUI with a countdown, live clock, study streaks and audible cues."
)]
pub struct Cli {
    /// hours on the countdown
    #[clap(short = 'H', long)]
    hours: Option<u64>,

    /// minutes on the countdown
    #[clap(short = 'm', long)]
    minutes: Option<u64>,

    /// seconds on the countdown
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// start with sound cues muted
    #[clap(long)]
    mute: bool,

    /// start in dark mode
    #[clap(long)]
    dark: bool,

    /// read (and with --write-config, write) this config file instead of the default
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// save the effective configuration and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }

    /// Layer command-line overrides on top of a loaded config.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(hours) = self.hours {
            config.hours = hours;
        }
        if let Some(minutes) = self.minutes {
            config.minutes = minutes;
        }
        if let Some(seconds) = self.seconds {
            config.seconds = seconds;
        }
        if self.mute {
            config.sound_enabled = false;
        }
        if self.dark {
            config.dark_mode = true;
        }
        config
    }
}

pub type AppSession = FocusSession<TimerView, TerminalBell<Stdout>, SystemClock>;

pub struct App {
    pub session: AppSession,
    pub presets: Vec<u64>,
    /// Per-second bell, opt-in through the config file.
    pub tick_bell: bool,
    pub focus: Option<Field>,
    pub settings_open: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, now: Instant) -> Self {
        Self {
            session: FocusSession::new(
                config,
                TimerView::default(),
                TerminalBell::stdout(config.tick_bell),
                SystemClock,
                now,
            ),
            presets: config.presets.clone(),
            tick_bell: config.tick_bell,
            focus: None,
            settings_open: false,
            should_quit: false,
        }
    }

    pub fn view(&self) -> &TimerView {
        self.session.presentation()
    }

    fn key_context(&self) -> KeyContext {
        KeyContext {
            focused: self.focus,
            settings_open: self.settings_open,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.session.poll(now);
        if !self.session.inputs().is_enabled() {
            self.focus = None;
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(command) = command_for_key(key, self.key_context()) else {
            return;
        };
        tracing::trace!(?command, "key command");

        match command {
            Command::Quit => self.should_quit = true,
            Command::Toggle => self.session.toggle(now),
            Command::Stop => {
                self.focus = None;
                self.settings_open = false;
                self.session.stop(now);
            }
            Command::ToggleSettings => self.settings_open = !self.settings_open,
            Command::FocusNext => {
                if self.session.inputs().is_enabled() {
                    self.focus = Some(self.focus.map_or(Field::Hours, Field::next));
                }
            }
            Command::Unfocus => self.focus = None,
            Command::Type(field, c) => {
                self.session.type_char(field, c);
            }
            Command::Erase(field) => {
                self.session.erase_char(field);
            }
            Command::Preset(idx) => {
                if let Some(&total) = self.presets.get(idx) {
                    if self.session.set_preset(total) {
                        self.settings_open = false;
                    }
                }
            }
            Command::ToggleSound => {
                self.session.toggle_sound();
            }
            Command::ToggleDarkMode => {
                self.session.toggle_dark_mode();
            }
        }

        if !self.session.inputs().is_enabled() {
            self.focus = None;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    let store = cli.config_store();
    let config = cli.apply(store.load());

    if cli.write_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    tracing::info!(
        total_secs = config.timer_config().total_seconds(),
        sound = config.sound_enabled,
        dark = config.dark_mode,
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, Instant::now());
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => app.on_key(key, Instant::now()),
        }

        if app.should_quit {
            break;
        }

        terminal.draw(|f| ui(app, f))?;
    }

    tracing::info!("exiting");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
