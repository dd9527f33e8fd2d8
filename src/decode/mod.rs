//! Decoding of the GCMS raw-data streams.
//!
//! # Pipeline
//!
//! ```text
//! Spectrum Index ──► offsets ─┐
//!                             ├──► aggregate_scans ──► ScanAggregate
//! MS Raw Data ───► raw bytes ─┘         │
//!                                       └─ decode_scan_block (per offset)
//! Retention Time ─► decode_retention_times
//! TIC Data ───────► decode_tic_intensities
//! ```
//!
//! Stream-level problems (wrong length, truncated index) are file-fatal and
//! returned as [`crate::error::QgdError`]. Block-level problems are collected
//! as [`ScanFailure`] records so that a damaged scan only costs that scan.

pub mod aggregate;
pub mod block;
pub mod error;
pub mod streams;

pub use aggregate::{aggregate_scans, ScanAggregate, ScanCorrection};
#[cfg(feature = "parallel")]
pub use aggregate::aggregate_scans_parallel;
pub use block::{
    decode_intensity, decode_mz, decode_scan_block, resolve_intensity_width, DecodedBlock,
    ScanHeader, ScanRow, WidthCorrection, SCAN_HEADER_SIZE,
};
pub use error::{ScanError, ScanFailure};
pub use streams::{decode_retention_times, decode_spectrum_index, decode_tic_intensities};
