use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "kuromi")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("kuromi_config.json"))
    }

    /// Log files live under $HOME/.local/state/kuromi when HOME is set.
    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("kuromi"),
            )
        } else {
            ProjectDirs::from("", "", "kuromi").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
