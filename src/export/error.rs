//! Errors raised while discovering inputs and writing outputs.

/// Errors that can occur while locating inputs or writing tables
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Input path does not exist
    #[error("Input not found: {0}")]
    InputNotFound(String),
}
