//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where session artifacts are written.
    pub output_dir: PathBuf,

    /// Default tracking parameters.
    pub tracking: TrackingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default tracking parameters applied to new sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingDefaults {
    /// Frame width in pixels (the detector's coordinate space).
    pub frame_width: f64,

    /// Frame height in pixels.
    pub frame_height: f64,

    /// Moving-average window for trajectory smoothing (samples).
    pub smoothing_window: usize,

    /// Maximum accepted per-frame displacement before a detection is
    /// treated as an outlier (pixels).
    pub max_jump_px: f64,

    /// Maximum physically plausible bat speed for power normalization
    /// (pixels per second).
    pub max_expected_speed: f64,

    /// Heatmap grid resolution.
    pub heatmap_cols: usize,
    pub heatmap_rows: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "swingman=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            tracking: TrackingDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        Self {
            frame_width: 1920.0,
            frame_height: 1080.0,
            smoothing_window: 4,
            max_jump_px: 120.0,
            max_expected_speed: 2000.0,
            heatmap_cols: 96,
            heatmap_rows: 54,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("swingman").join("config.json")
}

/// Default output directory. `SWINGMAN_OUTPUT_DIR` overrides the XDG path.
fn default_output_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SWINGMAN_OUTPUT_DIR") {
        return PathBuf::from(dir);
    }
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("swingman").join("sessions")
}
