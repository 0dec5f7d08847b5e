//! Logging and tracing initialization.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use crate::config::LoggingConfig;

/// Open the configured log file for appending. Falls back to standard
/// output when the file cannot be opened, so a bad path never silences
/// session logs.
fn open_log_file(path: &Path) -> Option<File> {
    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("swingman: cannot open log file {path:?}: {e}; logging to stdout");
            None
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Honors all three knobs: level filter (overridable via `RUST_LOG`), JSON
/// vs. human-readable output, and an optional log file target.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let log_file = config.file.as_deref().and_then(open_log_file);

    match (log_file, config.json) {
        (Some(file), true) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (Some(file), false) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, true) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, false) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swingman.log");

        init_logging(&LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        });

        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_log_file_falls_back() {
        // Parent path is a file, so the log file cannot be created
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"x").unwrap();

        assert!(open_log_file(&blocker.join("swingman.log")).is_none());
    }
}
