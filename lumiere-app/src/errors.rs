//! Error types for the driver.

use thiserror::Error;

/// Errors that can end a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] lumiere_data::ConfigError),

    #[error("Capture error: {0}")]
    Capture(#[from] lumiere_capture::CaptureError),

    #[error("Landmark stream error: {0}")]
    Stream(#[from] lumiere_capture::StreamError),

    #[error("Invalid command schedule: {0}")]
    Command(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
