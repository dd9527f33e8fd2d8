//! Scan-level errors and skipped-scan records.

use std::fmt;

/// Errors local to a single scan block.
///
/// A block failing with any of these is skipped; decoding of the remaining
/// scans continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Fewer than 32 bytes remain at the block offset
    #[error("Truncated scan header: {available} of 32 bytes available")]
    TruncatedHeader {
        /// Bytes remaining from the offset to end of stream
        available: usize,
    },

    /// The peak list runs past the end of the stream
    #[error("Incomplete data block at scan {scan}: need {needed} bytes, {available} available")]
    TruncatedDataBlock {
        /// Scan number from the header
        scan: i32,
        /// Bytes the header requires
        needed: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Header and index disagree and no intensity width reconciles them
    #[error(
        "Cannot resolve block size mismatch at scan {scan}: \
         expected {expected} bytes from header, {actual} from index"
    )]
    UnresolvableBlockSize {
        /// Scan number from the header
        scan: i32,
        /// Block size implied by the header
        expected: i64,
        /// Block size measured from neighbouring offsets
        actual: i64,
    },

    /// Intensity field wider than a u64
    #[error("Unsupported intensity width {width} bytes at scan {scan}")]
    UnsupportedIntensityWidth {
        /// Scan number from the header
        scan: i32,
        /// Declared width in bytes
        width: u16,
    },
}

/// A skipped scan, as surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    /// Position in the spectrum index (0-based)
    pub index: usize,
    /// Byte offset of the block in the MS raw-data stream
    pub offset: u32,
    /// Why the block was skipped
    pub error: ScanError,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} at offset {}: {}", self.index, self.offset, self.error)
    }
}
