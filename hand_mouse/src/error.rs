use std::path::PathBuf;

use pinch_pointer::ControlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not open window: {0}")]
    Window(String),

    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    ConfigParse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("invalid control settings: {0}")]
    Control(#[from] ControlError),

    #[cfg(feature = "leap")]
    #[error("LeapMotion: {0}")]
    Leap(String),
}
