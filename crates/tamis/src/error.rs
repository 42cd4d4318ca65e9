//! Error types for the optimization pipeline.

use std::path::PathBuf;

use tamis_crible::ScanError;

/// Any failure that aborts an optimization run.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    /// The source tree could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JavaScript module could not be copied.
    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The analytics report could not be serialized.
    #[error("Failed to serialize analytics: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for optimization operations.
pub type OptimizeResult<T> = Result<T, OptimizeError>;
