//! Tabular shapes for decoded TIC and MS1 data.
//!
//! - TIC: one row per retention time, `{rt_ms, rt_min, intensity}`.
//! - MS1 long: one row per peak, `{scan, rt_ms, rt_min, mz, intensity}`.
//! - MS1 wide: one row per retention time, one column per rounded m/z bin,
//!   see [`WideTable`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decode::ScanRow;
use crate::error::QgdError;

mod wide;

pub use wide::{WideRow, WideTable};

/// Milliseconds per minute.
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// Decimal places kept for rounded retention times in minutes.
pub const RT_MIN_DECIMALS: i32 = 5;

/// Data product decoded from a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Total ion chromatogram
    Tic,
    /// MS1 spectra
    Ms1,
}

impl OutputKind {
    /// Lowercase tag used in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Tic => "tic",
            OutputKind::Ms1 => "ms1",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Tic => write!(f, "TIC"),
            OutputKind::Ms1 => write!(f, "MS1"),
        }
    }
}

/// Layout of MS1 tables. TIC output has a single layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    /// One row per scan, one column per rounded m/z
    #[default]
    Wide,
    /// One row per peak
    Long,
}

/// One TIC row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TicRecord {
    /// Retention time in milliseconds
    #[serde(rename = "rt / ms")]
    pub rt_ms: i32,
    /// Retention time in minutes, rounded to 5 decimals
    #[serde(rename = "rt / min")]
    pub rt_min: f64,
    /// Total ion intensity
    pub intensity: i64,
}

/// One MS1 peak in long layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ms1LongRecord {
    /// Scan number
    pub scan: i32,
    /// Retention time in milliseconds
    #[serde(rename = "rt / ms")]
    pub rt_ms: i32,
    /// Retention time in minutes
    #[serde(rename = "rt / min")]
    pub rt_min: f64,
    /// Mass-to-charge ratio, unrounded
    pub mz: f64,
    /// Peak intensity
    pub intensity: u64,
}

/// An MS1 table in the requested layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Ms1Table {
    /// One row per peak
    Long(Vec<Ms1LongRecord>),
    /// Pivoted, one row per retention time
    Wide(WideTable),
}

impl Ms1Table {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        match self {
            Ms1Table::Long(rows) => rows.len(),
            Ms1Table::Wide(table) => table.rows.len(),
        }
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Round to a fixed number of decimals, ties to even.
pub fn round_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Convert milliseconds to minutes without rounding.
#[inline]
pub fn rt_minutes(rt_ms: i32) -> f64 {
    rt_ms as f64 / MS_PER_MINUTE
}

/// Convert milliseconds to minutes rounded to [`RT_MIN_DECIMALS`].
#[inline]
pub fn rt_minutes_rounded(rt_ms: i32) -> f64 {
    round_decimals(rt_minutes(rt_ms), RT_MIN_DECIMALS)
}

/// Integer m/z bin used by the wide layout (round half to even).
#[inline]
pub fn mz_bin(mz: f64) -> i64 {
    mz.round_ties_even() as i64
}

/// Pair retention times with TIC intensities.
///
/// # Errors
/// `QgdError::SeriesLengthMismatch` if the two series differ in length.
pub fn format_tic(retention_times: &[i32], intensities: &[i64]) -> Result<Vec<TicRecord>, QgdError> {
    if retention_times.len() != intensities.len() {
        return Err(QgdError::SeriesLengthMismatch {
            retention_times: retention_times.len(),
            intensities: intensities.len(),
        });
    }

    Ok(retention_times
        .iter()
        .zip(intensities)
        .map(|(&rt_ms, &intensity)| TicRecord {
            rt_ms,
            rt_min: rt_minutes_rounded(rt_ms),
            intensity,
        })
        .collect())
}

/// One long-layout row per decoded peak.
pub fn format_long(rows: &[ScanRow]) -> Vec<Ms1LongRecord> {
    rows.iter()
        .map(|row| Ms1LongRecord {
            scan: row.scan,
            rt_ms: row.rt_ms,
            rt_min: rt_minutes(row.rt_ms),
            mz: row.mz,
            intensity: row.intensity,
        })
        .collect()
}

/// Shape decoded MS1 rows into the requested layout.
pub fn format_ms1(rows: &[ScanRow], shape: TableShape) -> Ms1Table {
    match shape {
        TableShape::Long => Ms1Table::Long(format_long(rows)),
        TableShape::Wide => Ms1Table::Wide(WideTable::from_rows(rows)),
    }
}
