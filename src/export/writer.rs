//! CSV serialization of decoded tables.
//!
//! Every writer emits a header row, even for empty tables, and returns the
//! number of data rows written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::error::ExportError;
use crate::session::DecodedOutput;
use crate::table::{Ms1LongRecord, Ms1Table, TicRecord, WideTable};

/// Header of TIC tables.
pub const TIC_HEADERS: [&str; 3] = ["rt / ms", "rt / min", "intensity"];

/// Header of MS1 long tables.
pub const LONG_HEADERS: [&str; 5] = ["scan", "rt / ms", "rt / min", "mz", "intensity"];

fn headerless<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer)
}

fn write_records<W: Write, T: Serialize>(
    writer: W,
    headers: &[&str],
    rows: &[T],
) -> Result<usize, ExportError> {
    let mut csv = headerless(writer);
    csv.write_record(headers)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(rows.len())
}

/// Write TIC rows.
pub fn write_tic<W: Write>(writer: W, rows: &[TicRecord]) -> Result<usize, ExportError> {
    write_records(writer, &TIC_HEADERS, rows)
}

/// Write MS1 rows in long layout.
pub fn write_long<W: Write>(writer: W, rows: &[Ms1LongRecord]) -> Result<usize, ExportError> {
    write_records(writer, &LONG_HEADERS, rows)
}

/// Write a pivoted MS1 table.
pub fn write_wide<W: Write>(writer: W, table: &WideTable) -> Result<usize, ExportError> {
    let mut csv = headerless(writer);
    csv.write_record(table.headers())?;

    for row in &table.rows {
        csv.serialize((row.rt_min, row.rt_ms, row.total_intensity, &row.cells))?;
    }
    csv.flush()?;
    Ok(table.rows.len())
}

/// Write any decoded output in its natural layout.
pub fn write_output<W: Write>(writer: W, output: &DecodedOutput) -> Result<usize, ExportError> {
    match output {
        DecodedOutput::Tic(rows) => write_tic(writer, rows),
        DecodedOutput::Ms1(Ms1Table::Long(rows)) => write_long(writer, rows),
        DecodedOutput::Ms1(Ms1Table::Wide(table)) => write_wide(writer, table),
    }
}

/// Write a decoded output to a new file, replacing any existing one.
pub fn write_output_file<P: AsRef<Path>>(
    path: P,
    output: &DecodedOutput,
) -> Result<usize, ExportError> {
    let file = File::create(path.as_ref())?;
    write_output(BufWriter::new(file), output)
}
