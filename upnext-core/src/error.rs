//! Error types for upnext operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning calendar storage.
#[derive(Error, Debug)]
pub enum UpNextError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not traverse {path}: {message}", path = .path.display())]
    Traversal { path: PathBuf, message: String },

    #[error("Could not decode calendar data in {path}: {message}", path = .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Could not resolve {field} for event '{summary}'")]
    FieldResolution {
        field: &'static str,
        summary: String,
    },

    #[error("Could not read calendar title from {path}: {message}", path = .path.display())]
    Metadata { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for upnext operations.
pub type UpNextResult<T> = Result<T, UpNextError>;
