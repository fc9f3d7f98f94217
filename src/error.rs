//! Error types for the timer core and its configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors a timer command can report back to the user.
///
/// These are recoverable: the controller turns them into an error
/// notification and leaves the timer state untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// `start` was requested from `Ready` with a configured total of zero.
    #[error("Please set a time greater than 0!")]
    ZeroDuration,
}

/// Errors raised while writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_message_is_user_facing() {
        assert_eq!(
            TimerError::ZeroDuration.to_string(),
            "Please set a time greater than 0!"
        );
    }

    #[test]
    fn write_error_mentions_path() {
        let err = ConfigError::Write {
            path: PathBuf::from("/tmp/kuromi/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/kuromi/config.json"));
        assert!(msg.contains("denied"));
    }
}
