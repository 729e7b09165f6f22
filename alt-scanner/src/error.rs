//! Error types for alt-text scanning.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The scan root could not be used. Fatal: no traversal happens.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RootError {
    #[error("Path '{}' does not exist.", .0.display())]
    NotFound(PathBuf),
    #[error("Path '{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),
}

/// The kind of scan-level failure that prevented a file from being checked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// A non-empty directory sits at `max_depth`; its contents were not scanned.
    DepthLimitExceeded,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file (or directory) that could not be scanned.
///
/// Never fatal: the scan continues and the error is carried into the report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Build a scan error for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }

    /// Format the error as a report warning line.
    ///
    /// Read failures name the file being read; anything else is `{path}: {message}`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match self.kind {
            ScanErrorKind::IoError | ScanErrorKind::FileTooLarge | ScanErrorKind::InvalidEncoding => {
                format!(
                    "Warning: could not read {}: {}",
                    self.file.display(),
                    self.message
                )
            }
            ScanErrorKind::WalkError
            | ScanErrorKind::DepthLimitExceeded
            | ScanErrorKind::InvalidExcludePattern => {
                format!("Warning: {}: {}", self.file.display(), self.message)
            }
        }
    }
}
