//! Fixed-width little-endian stream decoders.

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::QgdError;

/// Decode the `Retention Time` stream (packed i32 LE, milliseconds).
pub fn decode_retention_times(bytes: &[u8]) -> Result<Vec<i32>, QgdError> {
    check_width("Retention Time", bytes, 4)?;
    let mut values = vec![0i32; bytes.len() / 4];
    LittleEndian::read_i32_into(bytes, &mut values);
    Ok(values)
}

/// Decode the `TIC Data` stream (packed i64 LE).
pub fn decode_tic_intensities(bytes: &[u8]) -> Result<Vec<i64>, QgdError> {
    check_width("TIC Data", bytes, 8)?;
    let mut values = vec![0i64; bytes.len() / 8];
    LittleEndian::read_i64_into(bytes, &mut values);
    Ok(values)
}

/// Decode the `Spectrum Index` stream into block offsets.
///
/// Offsets are unpacked sequentially until the buffer is exhausted. A trailing
/// partial record is an error rather than being dropped.
pub fn decode_spectrum_index(bytes: &[u8]) -> Result<Vec<u32>, QgdError> {
    check_width("Spectrum Index", bytes, 4)?;

    let mut cursor = bytes;
    let mut offsets = Vec::with_capacity(bytes.len() / 4);
    while !cursor.is_empty() {
        offsets.push(cursor.read_u32::<LittleEndian>()?);
    }
    Ok(offsets)
}

fn check_width(stream: &'static str, bytes: &[u8], width: usize) -> Result<(), QgdError> {
    if bytes.len() % width != 0 {
        return Err(QgdError::TruncatedStream {
            stream,
            width,
            len: bytes.len(),
        });
    }
    Ok(())
}
