use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "KUROMI_LOG";
pub const LOG_FILE: &str = "kuromi.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send `tracing` output to `dir/kuromi.log`. The TUI owns the terminal, so
/// nothing is ever written to stdout or stderr.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_in(dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}

/// Initialise file logging in the default state directory. Returns `None`
/// when no directory can be resolved or created; the app runs unlogged.
pub fn init() -> Option<WorkerGuard> {
    let dir = AppDirs::log_dir()?;
    match init_in(&dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("kuromi: logging disabled ({}): {err}", dir.display());
            None
        }
    }
}
