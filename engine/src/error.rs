//! Error types for camera configuration.
//!
//! Runtime camera operations never fail; only loading and validating
//! configuration can produce an error.

use thiserror::Error;

/// Errors produced while loading or validating camera configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid zoom range: min_zoom {min} must be below max_zoom {max}")]
    InvalidZoomRange { min: f32, max: f32 },

    #[error("invalid angle range: min_angle {min} must not exceed max_angle {max}")]
    InvalidAngleRange { min: f32, max: f32 },

    #[error("dampening must lie in (0, 1], got {0}")]
    InvalidDampening(f32),

    #[error("animation interval must be at least 1 ms")]
    InvalidInterval,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
