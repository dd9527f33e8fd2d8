use std::collections::BTreeMap;

use super::{mz_bin, rt_minutes_rounded};
use crate::decode::ScanRow;

/// One pivoted row.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    /// Retention time in minutes, rounded to 5 decimals
    pub rt_min: f64,
    /// Retention time in milliseconds
    pub rt_ms: i32,
    /// Sum of all cells in the row
    pub total_intensity: u64,
    /// Summed intensity per bin, aligned with [`WideTable::bins`]
    pub cells: Vec<u64>,
}

/// MS1 data pivoted to one row per retention time.
///
/// Columns are the distinct rounded m/z values of the whole run in ascending
/// order. Peaks sharing a row and a bin are summed, saturating at `u64::MAX`;
/// absent combinations are 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    /// Column bins, ascending
    pub bins: Vec<i64>,
    /// Rows ordered by retention time
    pub rows: Vec<WideRow>,
}

impl WideTable {
    /// Pivot flat scan rows.
    pub fn from_rows(rows: &[ScanRow]) -> Self {
        // Pass 1: global bin set and row keys. rt_min is a monotone function of
        // rt_ms, so ordering by rt_ms orders by (rt_min, rt_ms).
        let mut columns: BTreeMap<i64, usize> = BTreeMap::new();
        let mut keys: BTreeMap<i32, usize> = BTreeMap::new();
        for row in rows {
            columns.entry(mz_bin(row.mz)).or_insert(0);
            keys.entry(row.rt_ms).or_insert(0);
        }
        for (i, column) in columns.values_mut().enumerate() {
            *column = i;
        }
        for (i, key) in keys.values_mut().enumerate() {
            *key = i;
        }

        // Pass 2: fill the dense matrix
        let mut matrix = vec![vec![0u64; columns.len()]; keys.len()];
        for row in rows {
            let r = keys[&row.rt_ms];
            let c = columns[&mz_bin(row.mz)];
            matrix[r][c] = matrix[r][c].saturating_add(row.intensity);
        }

        let rows = keys
            .keys()
            .zip(matrix)
            .map(|(&rt_ms, cells)| WideRow {
                rt_min: rt_minutes_rounded(rt_ms),
                rt_ms,
                total_intensity: cells.iter().fold(0u64, |acc, &v| acc.saturating_add(v)),
                cells,
            })
            .collect();

        Self {
            bins: columns.into_keys().collect(),
            rows,
        }
    }

    /// Cell value for a retention time and bin, if both exist.
    pub fn cell(&self, rt_ms: i32, bin: i64) -> Option<u64> {
        let c = self.bins.binary_search(&bin).ok()?;
        let r = self
            .rows
            .binary_search_by_key(&rt_ms, |row| row.rt_ms)
            .ok()?;
        Some(self.rows[r].cells[c])
    }

    /// Column headers: key columns, `total_intensity`, then one per bin.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.bins.len() + 3);
        headers.push("rt / min".to_string());
        headers.push("rt / ms".to_string());
        headers.push("total_intensity".to_string());
        headers.extend(self.bins.iter().map(|bin| bin.to_string()));
        headers
    }
}
