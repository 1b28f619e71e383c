//! Shell errors
//!
//! `ShellError` is what handlers return; `ErrorKind` is what the front-end
//! sees. Resource-absence and protocol errors keep their own kind, every
//! other fault collapses into `HandlerFailure`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Error categories reported across the isolation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownCommand,
    InvalidArguments,
    InvalidSettingsShape,
    NoFocusedWindow,
    FileNotFound,
    BackendNotFound,
    EmptyContent,
    StartupFailed,
    HandlerFailure,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command registered twice: {0}")]
    DuplicateCommand(String),

    #[error("Invalid arguments for {command}: {source}")]
    InvalidArguments {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid settings object provided: {0}")]
    InvalidSettingsShape(String),

    #[error("No focused window found")]
    NoFocusedWindow,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No content provided to save")]
    EmptyContent,

    #[error("Backend entry point not found at: {}", .0.display())]
    BackendNotFound(PathBuf),

    #[error("Backend server failed to start properly: {0}")]
    StartupFailed(String),

    #[error("Window operation failed: {0}")]
    Window(String),

    #[error("Handler panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShellError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            ShellError::InvalidArguments { .. } => ErrorKind::InvalidArguments,
            ShellError::InvalidSettingsShape(_) => ErrorKind::InvalidSettingsShape,
            ShellError::NoFocusedWindow => ErrorKind::NoFocusedWindow,
            ShellError::FileNotFound(_) => ErrorKind::FileNotFound,
            ShellError::BackendNotFound(_) => ErrorKind::BackendNotFound,
            ShellError::EmptyContent => ErrorKind::EmptyContent,
            ShellError::StartupFailed(_) => ErrorKind::StartupFailed,
            ShellError::DuplicateCommand(_)
            | ShellError::Window(_)
            | ShellError::Panicked(_)
            | ShellError::Io(_)
            | ShellError::Json(_) => ErrorKind::HandlerFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_faults_map_to_handler_failure() {
        let io = ShellError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(io.kind(), ErrorKind::HandlerFailure);
        assert_eq!(ShellError::Panicked("boom".into()).kind(), ErrorKind::HandlerFailure);
        assert_eq!(ShellError::Window("gone".into()).kind(), ErrorKind::HandlerFailure);
    }

    #[test]
    fn test_expected_absence_keeps_its_kind() {
        assert_eq!(ShellError::NoFocusedWindow.kind(), ErrorKind::NoFocusedWindow);
        assert_eq!(ShellError::FileNotFound(PathBuf::from("/a")).kind(), ErrorKind::FileNotFound);
        assert_eq!(ShellError::BackendNotFound(PathBuf::from("/b")).kind(), ErrorKind::BackendNotFound);
        assert_eq!(ShellError::UnknownCommand("x".into()).to_string(), "Unknown command: x");
    }
}
