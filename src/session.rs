//! Decoding sessions over a single `.qgd` file.
//!
//! [`QgdReader`] owns the container for its lifetime and exposes the decoded
//! streams. [`decode_file`] is the one-call entry point used by the CLI.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::info;

use crate::container::{
    QgdContainer, MS_RAW_DATA_STREAM, RETENTION_TIME_STREAM, SPECTRUM_INDEX_STREAM,
    TIC_DATA_STREAM,
};
use crate::decode::{
    aggregate_scans, decode_retention_times, decode_spectrum_index, decode_tic_intensities,
    ScanAggregate, ScanCorrection, ScanFailure,
};
use crate::error::QgdError;
use crate::table::{format_ms1, format_tic, Ms1Table, OutputKind, TableShape, TicRecord};

/// What to decode from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    /// Requested outputs; decoded in the order TIC, MS1
    pub outputs: BTreeSet<OutputKind>,
    /// Layout of MS1 tables
    pub shape: TableShape,
    /// Decode scan blocks on the rayon pool (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for DecodeRequest {
    fn default() -> Self {
        Self {
            outputs: BTreeSet::from([OutputKind::Ms1]),
            shape: TableShape::default(),
            parallel: false,
        }
    }
}

impl DecodeRequest {
    /// Request a single output kind.
    pub fn new(kind: OutputKind, shape: TableShape) -> Self {
        Self {
            outputs: BTreeSet::from([kind]),
            shape,
            parallel: false,
        }
    }

    /// Request TIC and MS1.
    pub fn all(shape: TableShape) -> Self {
        Self {
            outputs: BTreeSet::from([OutputKind::Tic, OutputKind::Ms1]),
            shape,
            parallel: false,
        }
    }

    /// Enable or disable parallel block decoding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// One decoded data product, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedOutput {
    /// TIC rows
    Tic(Vec<TicRecord>),
    /// MS1 table in the requested layout
    Ms1(Ms1Table),
}

impl DecodedOutput {
    /// Kind of this output.
    pub fn kind(&self) -> OutputKind {
        match self {
            DecodedOutput::Tic(_) => OutputKind::Tic,
            DecodedOutput::Ms1(_) => OutputKind::Ms1,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        match self {
            DecodedOutput::Tic(rows) => rows.len(),
            DecodedOutput::Ms1(table) => table.len(),
        }
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything decoded from one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOutcome {
    /// One entry per requested kind, TIC first
    pub outputs: Vec<DecodedOutput>,
    /// Whether MS scan data was read; false for TIC-only requests
    pub scans_read: bool,
    /// Scans in the spectrum index (0 when MS1 was not requested)
    pub scans_total: usize,
    /// Scans that decoded
    pub scans_decoded: usize,
    /// Peaks decoded across all scans
    pub peak_count: usize,
    /// Scans whose intensity width was recovered
    pub corrections: Vec<ScanCorrection>,
    /// Scans that were skipped
    pub failures: Vec<ScanFailure>,
}

impl DecodeOutcome {
    /// Output of a given kind, if it was requested.
    pub fn output(&self, kind: OutputKind) -> Option<&DecodedOutput> {
        self.outputs.iter().find(|o| o.kind() == kind)
    }
}

/// A decoding session over one container.
#[derive(Debug)]
pub struct QgdReader<F = File> {
    container: QgdContainer<F>,
}

impl QgdReader<File> {
    /// Open a `.qgd` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, QgdError> {
        Ok(Self {
            container: QgdContainer::open(path)?,
        })
    }
}

impl<F: Read + Seek> QgdReader<F> {
    /// Wrap an already opened container.
    pub fn new(container: QgdContainer<F>) -> Self {
        Self { container }
    }

    /// Access the underlying container.
    pub fn container(&self) -> &QgdContainer<F> {
        &self.container
    }

    /// Decoded `Retention Time` stream.
    pub fn retention_times(&mut self) -> Result<Vec<i32>, QgdError> {
        decode_retention_times(&self.container.read_stream(&RETENTION_TIME_STREAM)?)
    }

    /// Decoded `TIC Data` stream.
    pub fn tic_intensities(&mut self) -> Result<Vec<i64>, QgdError> {
        decode_tic_intensities(&self.container.read_stream(&TIC_DATA_STREAM)?)
    }

    /// Decoded `Spectrum Index` stream.
    pub fn spectrum_index(&mut self) -> Result<Vec<u32>, QgdError> {
        decode_spectrum_index(&self.container.read_stream(&SPECTRUM_INDEX_STREAM)?)
    }

    /// Raw `MS Raw Data` stream.
    pub fn ms_raw_data(&mut self) -> Result<Vec<u8>, QgdError> {
        self.container.read_stream(&MS_RAW_DATA_STREAM)
    }

    /// TIC rows.
    ///
    /// # Errors
    /// Fails if either stream is missing or truncated, or if the two series
    /// differ in length.
    pub fn read_tic(&mut self) -> Result<Vec<TicRecord>, QgdError> {
        let intensities = self.tic_intensities()?;
        let retention_times = self.retention_times()?;
        format_tic(&retention_times, &intensities)
    }

    /// Decode every MS1 scan.
    ///
    /// Damaged scans are skipped and listed in the returned aggregate; only
    /// missing or truncated streams fail the call.
    pub fn read_scans(&mut self, parallel: bool) -> Result<ScanAggregate, QgdError> {
        info!("Preparing MS data...");
        let raw = self.ms_raw_data()?;
        let offsets = self.spectrum_index()?;

        info!("Reading {} scans...", offsets.len());
        Ok(aggregate(&raw, &offsets, parallel))
    }

    /// Decode everything the request asks for.
    pub fn decode(&mut self, request: &DecodeRequest) -> Result<DecodeOutcome, QgdError> {
        let mut outcome = DecodeOutcome::default();

        for kind in &request.outputs {
            match kind {
                OutputKind::Tic => {
                    let rows = self.read_tic()?;
                    outcome.outputs.push(DecodedOutput::Tic(rows));
                }
                OutputKind::Ms1 => {
                    let aggregate = self.read_scans(request.parallel)?;
                    info!("Formatting data...");
                    let table = format_ms1(&aggregate.rows, request.shape);

                    outcome.scans_read = true;
                    outcome.scans_total = aggregate.scans_decoded + aggregate.failures.len();
                    outcome.scans_decoded = aggregate.scans_decoded;
                    outcome.peak_count = aggregate.rows.len();
                    outcome.corrections = aggregate.corrections;
                    outcome.failures = aggregate.failures;
                    outcome.outputs.push(DecodedOutput::Ms1(table));
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(feature = "parallel")]
fn aggregate(raw: &[u8], offsets: &[u32], parallel: bool) -> ScanAggregate {
    if parallel {
        crate::decode::aggregate_scans_parallel(raw, offsets)
    } else {
        aggregate_scans(raw, offsets)
    }
}

#[cfg(not(feature = "parallel"))]
fn aggregate(raw: &[u8], offsets: &[u32], parallel: bool) -> ScanAggregate {
    if parallel {
        log::warn!("Parallel decoding requested but built without the parallel feature; decoding sequentially.");
    }
    aggregate_scans(raw, offsets)
}

/// Decode a `.qgd` file in one call.
///
/// The container is released before this returns, whether decoding
/// succeeded or not.
pub fn decode_file<P: AsRef<Path>>(
    path: P,
    request: &DecodeRequest,
) -> Result<DecodeOutcome, QgdError> {
    let path = path.as_ref();
    info!("Decoding {}", path.display());
    QgdReader::open(path)?.decode(request)
}
