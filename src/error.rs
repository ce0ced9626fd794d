//! Error types for watch-rerun
//!
//! Every variant is fatal to the loop. A failing test command is not an
//! error; it is reported as a normal run outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for watch-rerun operations
pub type RerunResult<T> = Result<T, RerunError>;

/// Main error type for watch-rerun operations
#[derive(Error, Debug)]
pub enum RerunError {
    /// Bad or empty input (no paths, empty command, invalid option)
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A watch target does not exist at start-up
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// The change notifier failed while the loop was running
    #[error("watch error: {message}")]
    Watch {
        message: String,
        path: Option<PathBuf>,
    },

    /// Config file could not be parsed
    #[error("invalid config file {file}: {message}")]
    ConfigFile { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RerunError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn watch(message: impl Into<String>) -> Self {
        Self::Watch {
            message: message.into(),
            path: None,
        }
    }

    pub fn watch_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Watch {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Process exit code for this error.
    ///
    /// `0` is reserved for a clean interrupt.
    pub fn exit_code(&self) -> i32 {
        match self {
            RerunError::Configuration { .. } => 2,
            RerunError::NotFound { .. } => 3,
            RerunError::Watch { .. } => 4,
            RerunError::ConfigFile { .. } | RerunError::Io(_) => 1,
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            RerunError::NotFound { path } => Some(path),
            RerunError::Watch { path, .. } => path.as_deref(),
            RerunError::ConfigFile { file, .. } => Some(file),
            RerunError::Configuration { .. } | RerunError::Io(_) => None,
        }
    }
}

impl From<notify::Error> for RerunError {
    fn from(err: notify::Error) -> Self {
        let path = err.paths.first().cloned();
        RerunError::Watch {
            message: err.to_string(),
            path,
        }
    }
}
