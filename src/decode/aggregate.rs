//! Drive the block decoder across the whole spectrum index.

use log::{error, warn};

use super::block::{decode_scan_block, DecodedBlock, ScanRow, WidthCorrection};
use super::error::{ScanError, ScanFailure};

/// A scan whose header width was corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCorrection {
    /// Position in the spectrum index (0-based)
    pub index: usize,
    /// Byte offset of the block
    pub offset: u32,
    /// Scan number from the header
    pub scan: i32,
    /// Declared and resolved widths
    pub correction: WidthCorrection,
}

/// Rows from every decodable scan plus diagnostics for the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanAggregate {
    /// Flat peak rows in spectrum-index order
    pub rows: Vec<ScanRow>,
    /// Number of scans that decoded successfully
    pub scans_decoded: usize,
    /// Scans whose intensity width was recovered
    pub corrections: Vec<ScanCorrection>,
    /// Scans that were skipped
    pub failures: Vec<ScanFailure>,
}

impl ScanAggregate {
    /// Whether every scan decoded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn push(&mut self, index: usize, offset: u32, result: Result<DecodedBlock, ScanError>) {
        match result {
            Ok(block) => {
                if let Some(correction) = block.correction {
                    warn!(
                        "Scan {}: corrected n_bytes from {} to {}",
                        block.header.scan, correction.declared, correction.resolved
                    );
                    self.corrections.push(ScanCorrection {
                        index,
                        offset,
                        scan: block.header.scan,
                        correction,
                    });
                }
                self.scans_decoded += 1;
                self.rows.extend(block.rows);
            }
            Err(error) => {
                let failure = ScanFailure {
                    index,
                    offset,
                    error,
                };
                error!("Skipping {}", failure);
                self.failures.push(failure);
            }
        }
    }
}

/// Pair each offset with its successor (`None` for the last).
fn block_bounds(offsets: &[u32]) -> impl Iterator<Item = (usize, u32, Option<u32>)> + '_ {
    offsets
        .iter()
        .enumerate()
        .map(move |(i, &offset)| (i, offset, offsets.get(i + 1).copied()))
}

/// Decode every block addressed by `offsets`, sequentially.
///
/// A failing block never aborts the run; it is recorded in
/// [`ScanAggregate::failures`] and decoding continues with the next offset.
pub fn aggregate_scans(raw: &[u8], offsets: &[u32]) -> ScanAggregate {
    let mut aggregate = ScanAggregate::default();
    for (index, offset, next) in block_bounds(offsets) {
        aggregate.push(index, offset, decode_scan_block(raw, offset, next));
    }
    aggregate
}

/// Decode every block addressed by `offsets` with rayon.
///
/// Blocks are independent, so they are decoded concurrently and merged back in
/// index order. The result is identical to [`aggregate_scans`].
#[cfg(feature = "parallel")]
pub fn aggregate_scans_parallel(raw: &[u8], offsets: &[u32]) -> ScanAggregate {
    use rayon::prelude::*;

    let decoded: Vec<_> = (0..offsets.len())
        .into_par_iter()
        .map(|i| {
            let offset = offsets[i];
            (i, offset, decode_scan_block(raw, offset, offsets.get(i + 1).copied()))
        })
        .collect();

    let mut aggregate = ScanAggregate::default();
    for (index, offset, result) in decoded {
        aggregate.push(index, offset, result);
    }
    aggregate
}
