//! Error types for scan operations.

use std::path::PathBuf;

/// Result type alias for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Errors that can occur while scanning.
///
/// Reaching the result budget is never an error; the walk simply stops.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The directory the scan should start from does not exist.
    #[error("Start path does not exist: {0}")]
    StartNotFound(PathBuf),

    /// The start path exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The requested start path resolves to a location outside the root.
    #[error("Path is outside the root directory: {0}")]
    OutsideRoot(PathBuf),

    /// Failed to read directory contents.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Creates a new `StartNotFound` error.
    pub fn start_not_found(path: impl Into<PathBuf>) -> Self {
        Self::StartNotFound(path.into())
    }

    /// Creates a new `NotADirectory` error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    /// Creates a new `OutsideRoot` error.
    pub fn outside_root(path: impl Into<PathBuf>) -> Self {
        Self::OutsideRoot(path.into())
    }

    /// Creates a new `ReadDirectory` error.
    pub fn read_directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDirectory {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the error was caused by the caller's request
    /// rather than by the filesystem.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::OutsideRoot(_) | Self::NotADirectory(_))
    }
}
