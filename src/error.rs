//! File-level error types.
//!
//! These abort decoding of a whole file. Per-scan problems are reported
//! through [`crate::decode::ScanError`] instead and never surface here.

use thiserror::Error;

/// Errors that abort decoding of a `.qgd` file.
#[derive(Error, Debug)]
pub enum QgdError {
    /// File is not a compound document (or could not be opened as one)
    #[error("Failed to open compound document {path}: {source}")]
    ContainerOpen {
        /// Path of the file that failed to open
        path: String,
        /// Underlying I/O or format error
        #[source]
        source: std::io::Error,
    },

    /// A required stream is absent from the container
    #[error("Stream not found: {0}")]
    StreamNotFound(String),

    /// Stream length is not a multiple of its element width
    #[error("Truncated stream {stream}: {len} bytes is not a multiple of {width}")]
    TruncatedStream {
        /// Stream name
        stream: &'static str,
        /// Element width in bytes
        width: usize,
        /// Actual stream length in bytes
        len: usize,
    },

    /// Retention-time and TIC-intensity series differ in length
    #[error("Series length mismatch: {retention_times} retention times vs {intensities} TIC intensities")]
    SeriesLengthMismatch {
        /// Number of retention-time entries
        retention_times: usize,
        /// Number of TIC intensity entries
        intensities: usize,
    },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
