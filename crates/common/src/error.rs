//! Error types shared across Swingman crates.

use std::path::PathBuf;

/// Top-level error type for Swingman operations.
#[derive(Debug, thiserror::Error)]
pub enum SwingmanError {
    #[error("Tracking error: {message}")]
    Tracking { message: String },

    #[error("Analysis error: {message}")]
    Analysis { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid transition: {operation} is not allowed from the {state} state")]
    InvalidTransition { state: String, operation: String },

    #[error("Insufficient swing data: path has {points} points, analysis needs at least {required}")]
    InsufficientData { points: usize, required: usize },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SwingmanError.
pub type SwingmanResult<T> = Result<T, SwingmanError>;

impl SwingmanError {
    pub fn tracking(msg: impl Into<String>) -> Self {
        Self::Tracking {
            message: msg.into(),
        }
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_transition(state: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::InvalidTransition {
            state: state.into(),
            operation: operation.into(),
        }
    }

    pub fn insufficient_data(points: usize, required: usize) -> Self {
        Self::InsufficientData { points, required }
    }

    /// Whether this error leaves the session usable (result-level errors
    /// surfaced to the client rather than faults).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = SwingmanError::insufficient_data(1, 2);
        let msg = err.to_string();
        assert!(msg.contains("1 points"));
        assert!(msg.contains("at least 2"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = SwingmanError::invalid_transition("Idle", "stop_swing");
        assert!(err.to_string().contains("stop_swing"));
        assert!(err.to_string().contains("Idle"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_domain_errors_are_not_recoverable() {
        assert!(!SwingmanError::export("disk full").is_recoverable());
        assert!(!SwingmanError::tracking("bad frame").is_recoverable());
    }
}
