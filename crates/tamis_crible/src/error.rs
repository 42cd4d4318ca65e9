//! Error types for usage scanning.

use std::path::PathBuf;

/// Errors that abort a usage scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A directory or entry could not be visited during the walk.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A matched source file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for scanning operations.
pub type ScanResult<T> = Result<T, ScanError>;
