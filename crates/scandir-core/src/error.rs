//! Error types for scanning operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during a scan.
///
/// `InvalidArgument` is always produced before any filesystem access. The
/// remaining variants come from the filesystem while traversing and abort
/// the whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Bad call-site input (empty path, zero concurrency, mistyped option).
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A traversal task panicked or was cancelled by the runtime.
    #[error("Traversal task failed: {message}")]
    Task { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
        assert_eq!(err.path(), Some(Path::new("/test/path")));
    }

    #[test]
    fn test_scan_error_not_found() {
        let err = ScanError::io(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert!(err.to_string().contains("/missing"));
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = ScanError::invalid_argument("path must be a valid string");
        assert!(err.is_invalid_argument());
        assert!(err.path().is_none());
        assert_eq!(
            err.to_string(),
            "Invalid argument: path must be a valid string"
        );
    }
}
