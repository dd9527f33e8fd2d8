//! # qgd - Shimadzu GCMS `.qgd` Decoder
//!
//! `qgd` reads the raw-data streams of Shimadzu GCMS `.qgd` files (OLE
//! compound documents) and turns them into tables: the total ion chromatogram
//! (TIC) and per-scan MS1 peak lists, either one row per peak ("long") or one
//! row per scan with a column per rounded m/z ("wide").
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qgd::prelude::*;
//!
//! let request = DecodeRequest::all(TableShape::Wide);
//! let outcome = decode_file("sample.qgd", &request)?;
//!
//! for output in &outcome.outputs {
//!     println!("{}: {} rows", output.kind(), output.len());
//! }
//! for failure in &outcome.failures {
//!     eprintln!("skipped {}", failure);
//! }
//! # Ok::<(), qgd::error::QgdError>(())
//! ```
//!
//! ## Damaged scans
//!
//! Scan headers sometimes declare the wrong intensity width. The spectrum
//! index gives an independent block size, and when the two disagree the width
//! is re-derived from the index. Scans that cannot be reconciled are skipped
//! and reported; they never abort the file.
//!
//! ## Architecture
//!
//! - [`container`]: compound-document stream access
//! - [`decode`]: stream decoders, scan block decoder and aggregator
//! - [`table`]: TIC, MS1 long and MS1 wide layouts
//! - [`session`]: per-file decoding session and entry point
//! - [`export`]: CSV writers and output naming
//! - [`discover`]: input file discovery
//! - [`report`]: per-file decode summaries

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod container;
pub mod decode;
pub mod discover;
pub mod error;
pub mod export;
pub mod report;
pub mod session;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::container::QgdContainer;
    pub use crate::decode::{ScanAggregate, ScanCorrection, ScanError, ScanFailure, ScanRow};
    pub use crate::error::QgdError;
    pub use crate::report::DecodeReport;
    pub use crate::session::{decode_file, DecodeOutcome, DecodeRequest, DecodedOutput, QgdReader};
    pub use crate::table::{Ms1LongRecord, Ms1Table, OutputKind, TableShape, TicRecord, WideTable};
}
