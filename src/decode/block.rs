//! Scan block decoding.
//!
//! Each scan in `MS Raw Data` is a fixed 32-byte header followed by `n_val`
//! peak records of `2 + n_bytes` bytes:
//!
//! ```text
//! 0      4      8                  20     22     24            32
//! +------+------+------------------+------+------+-------------+
//! | scan | rt   | reserved (12)    |n_byte| n_val| reserved (8)|
//! +------+------+------------------+------+------+-------------+
//! | mz u16 | intensity (n_bytes) | mz u16 | intensity | ...
//! ```
//!
//! Instruments are known to write headers whose `n_bytes` disagrees with the
//! real record width. When the spectrum index gives a block span that does not
//! match the header, the width is re-derived from the span (see
//! [`resolve_intensity_width`]).

use byteorder::{ByteOrder, LittleEndian};

use super::error::ScanError;

/// Size of the per-scan header in bytes.
pub const SCAN_HEADER_SIZE: usize = 32;

/// Bytes used by the raw m/z field of a peak record.
pub const MZ_FIELD_SIZE: usize = 2;

/// Divisor converting the raw u16 m/z to Thomsons.
pub const MZ_SCALE: f64 = 20.0;

/// Candidate intensity widths tried, in order, when recovering a block size.
pub const CANDIDATE_WIDTHS: [u16; 5] = [1, 2, 3, 4, 5];

/// Mask applied to 4-byte intensities; the top bit is not part of the value.
pub const FOUR_BYTE_INTENSITY_MASK: u64 = 0x7FFF_FFFF;

/// Fixed-size header at the start of each scan block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanHeader {
    /// Scan number
    pub scan: i32,
    /// Retention time in milliseconds
    pub rt_ms: i32,
    /// Declared byte width of each intensity field
    pub n_bytes: u16,
    /// Number of peaks in the block
    pub n_val: u16,
}

impl ScanHeader {
    /// Parse a header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, ScanError> {
        if bytes.len() < SCAN_HEADER_SIZE {
            return Err(ScanError::TruncatedHeader {
                available: bytes.len(),
            });
        }
        Ok(Self {
            scan: LittleEndian::read_i32(&bytes[0..4]),
            rt_ms: LittleEndian::read_i32(&bytes[4..8]),
            n_bytes: LittleEndian::read_u16(&bytes[20..22]),
            n_val: LittleEndian::read_u16(&bytes[22..24]),
        })
    }

    /// Bytes taken by the peak list for a given intensity width.
    pub fn data_len(&self, n_bytes: u16) -> usize {
        self.n_val as usize * (MZ_FIELD_SIZE + n_bytes as usize)
    }

    /// Total block size implied by the header alone.
    pub fn block_len(&self) -> usize {
        SCAN_HEADER_SIZE + self.data_len(self.n_bytes)
    }
}

/// One decoded peak, flattened with its scan's header fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRow {
    /// Scan number
    pub scan: i32,
    /// Retention time in milliseconds
    pub rt_ms: i32,
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Peak intensity
    pub intensity: u64,
}

/// An intensity width that was corrected from the block span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthCorrection {
    /// Width claimed by the header
    pub declared: u16,
    /// Width that reconciles the header with the index
    pub resolved: u16,
}

/// Result of decoding one block.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBlock {
    /// Header as read from the stream
    pub header: ScanHeader,
    /// Set when the header width had to be corrected
    pub correction: Option<WidthCorrection>,
    /// One row per peak
    pub rows: Vec<ScanRow>,
}

/// Reconcile a header with the block span measured from the spectrum index.
///
/// `actual` is the full block size (header included). Candidate widths are
/// tried in ascending order and the first `b` with
/// `actual - 32 == n_val * (2 + b)` wins.
pub fn resolve_intensity_width(
    header: &ScanHeader,
    actual: i64,
) -> Result<WidthCorrection, ScanError> {
    let data_size = actual - SCAN_HEADER_SIZE as i64;
    CANDIDATE_WIDTHS
        .iter()
        .copied()
        .find(|&b| data_size == header.n_val as i64 * (MZ_FIELD_SIZE as i64 + b as i64))
        .map(|resolved| WidthCorrection {
            declared: header.n_bytes,
            resolved,
        })
        .ok_or(ScanError::UnresolvableBlockSize {
            scan: header.scan,
            expected: header.block_len() as i64,
            actual,
        })
}

/// Decode the scan block starting at `offset`.
///
/// `next_offset` is the following entry of the spectrum index, or `None` for
/// the final block, whose extent is then taken from the header alone.
pub fn decode_scan_block(
    raw: &[u8],
    offset: u32,
    next_offset: Option<u32>,
) -> Result<DecodedBlock, ScanError> {
    let start = offset as usize;
    let block = raw.get(start..).unwrap_or_default();
    let header = ScanHeader::parse(block)?;

    let mut n_bytes = header.n_bytes;
    let mut correction = None;

    if let Some(next) = next_offset {
        let expected = header.block_len() as i64;
        let actual = next as i64 - offset as i64;
        if expected != actual {
            let fixed = resolve_intensity_width(&header, actual)?;
            n_bytes = fixed.resolved;
            correction = Some(fixed);
        }
    }

    if n_bytes as usize > std::mem::size_of::<u64>() {
        return Err(ScanError::UnsupportedIntensityWidth {
            scan: header.scan,
            width: n_bytes,
        });
    }

    let data = &block[SCAN_HEADER_SIZE..];
    let needed = header.data_len(n_bytes);
    if data.len() < needed {
        return Err(ScanError::TruncatedDataBlock {
            scan: header.scan,
            needed,
            available: data.len(),
        });
    }

    let stride = MZ_FIELD_SIZE + n_bytes as usize;
    let rows = data[..needed]
        .chunks_exact(stride)
        .map(|record| ScanRow {
            scan: header.scan,
            rt_ms: header.rt_ms,
            mz: decode_mz(LittleEndian::read_u16(&record[..MZ_FIELD_SIZE])),
            intensity: decode_intensity(&record[MZ_FIELD_SIZE..]),
        })
        .collect();

    Ok(DecodedBlock {
        header,
        correction,
        rows,
    })
}

/// Convert a raw u16 m/z value to Thomsons.
#[inline]
pub fn decode_mz(raw: u16) -> f64 {
    raw as f64 / MZ_SCALE
}

/// Decode an unsigned little-endian intensity field of 0..=8 bytes.
///
/// Four-byte fields drop their top bit.
#[inline]
pub fn decode_intensity(bytes: &[u8]) -> u64 {
    match bytes.len() {
        0 => 0,
        4 => LittleEndian::read_u32(bytes) as u64 & FOUR_BYTE_INTENSITY_MASK,
        n => LittleEndian::read_uint(bytes, n),
    }
}
