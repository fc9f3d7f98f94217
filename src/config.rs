use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::timer::TimerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Preset durations in seconds, bound to the number keys in order.
    pub presets: Vec<u64>,
    pub sound_enabled: bool,
    pub dark_mode: bool,
    /// Ring the bell on every countdown second, not just the urgent window.
    pub tick_bell: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 25,
            seconds: 0,
            presets: vec![5 * 60, 15 * 60, 25 * 60, 45 * 60, 60 * 60],
            sound_enabled: true,
            dark_mode: false,
            tick_bell: false,
        }
    }
}

impl Config {
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::new(self.hours, self.minutes, self.seconds)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            sound_enabled: self.sound_enabled,
            dark_mode: self.dark_mode,
        }
    }
}

/// User toggles that live for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sound_enabled: bool,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().settings()
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "ignoring malformed config")
                }
            },
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "no config file, using defaults")
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(cfg)?;
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, data).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            hours: 1,
            minutes: 30,
            seconds: 15,
            presets: vec![90],
            sound_enabled: false,
            dark_mode: true,
            tick_bell: true,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "minutes": 50, "dark_mode": true }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.minutes, 50);
        assert!(cfg.dark_mode);
        assert_eq!(cfg.presets, Config::default().presets);
        assert!(cfg.sound_enabled);
    }

    #[test]
    fn config_projects_to_timer_and_settings() {
        let cfg = Config::default();
        assert_eq!(cfg.timer_config().total_seconds(), 25 * 60);
        assert_eq!(
            cfg.settings(),
            Settings {
                sound_enabled: true,
                dark_mode: false
            }
        );
    }
}
