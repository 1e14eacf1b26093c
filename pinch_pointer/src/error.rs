//! Construction-time errors.
//!
//! Per-frame processing is total and never returns these; they only come out
//! of validating configuration and screen bounds before the loop starts.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("smoothing factor must be a finite number greater than 1, got {0}")]
    InvalidSmoothingFactor(f64),

    #[error("pinch threshold must be a finite positive distance, got {0}")]
    InvalidThreshold(f64),

    #[error("release threshold {release} must be finite and not below the pinch threshold {threshold}")]
    InvalidReleaseThreshold { threshold: f64, release: f64 },

    #[error("minimum confidence must lie in [0, 1], got {0}")]
    InvalidConfidence(f32),

    #[error("target space must be non-empty, got {width}x{height}")]
    EmptyScreen { width: u32, height: u32 },

    #[error("target space {width}x{height} exceeds the pointer's coordinate range")]
    ScreenTooLarge { width: u32, height: u32 },
}
