//! Error types for curve editing

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, validating or rewriting a curve file
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid line {line}: \"{text}\"")]
    InvalidLine { line: usize, text: String },

    #[error("Current value cannot be zero")]
    DivisionByZero,

    #[error("Cannot scale from {current} to {target}: values must be finite and not negative")]
    InvalidScale { current: f64, target: f64 },

    #[error("Invalid value for '{key}': \"{value}\"")]
    ConfigParse { key: String, value: String },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl EngineError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
