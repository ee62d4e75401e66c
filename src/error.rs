use std::path::PathBuf;

use thiserror::Error;

/// Errors from the file-facing parts of the crate.
///
/// Gesture detection itself never fails; a timed-out gesture is reported as
/// `SwerveSignal::Canceled`.
#[derive(Error, Debug)]
pub enum SwerveError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{path}:{line} {message}")]
    Trace {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{path}:{line} invalid expected event kind: {kind}")]
    UnknownKind {
        path: PathBuf,
        line: usize,
        kind: String,
    },
}

pub type Result<T> = std::result::Result<T, SwerveError>;
