// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod inputs;
pub mod keymap;
pub mod logging;
pub mod messages;
pub mod runtime;
pub mod session;
pub mod sound;
pub mod stats;
pub mod surface;
pub mod timer;
pub mod view;
