//! Output file naming and collision avoidance.
//!
//! An existing file is never replaced unless overwriting was requested. A
//! clashing name first gains a `_YYYYmmdd_HHMMSS` timestamp, then a numeric
//! suffix after the timestamp until the name is free.

use std::path::{Path, PathBuf};

use crate::table::OutputKind;

/// Extension of written tables.
pub const CSV_EXTENSION: &str = "csv";

/// Timestamp layout appended to clashing file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Force a `.csv` extension.
pub fn ensure_csv_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|e| e == CSV_EXTENSION) {
        path.to_path_buf()
    } else {
        path.with_extension(CSV_EXTENSION)
    }
}

/// Default output path for an input file.
///
/// `kind` adds a `_tic` / `_ms1` suffix and is only needed when several
/// outputs are written for the same input.
pub fn default_output_path(output_dir: &Path, input: &Path, kind: Option<OutputKind>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = match kind {
        Some(kind) => format!("{}_{}.{}", stem, kind.as_str(), CSV_EXTENSION),
        None => format!("{}.{}", stem, CSV_EXTENSION),
    };
    output_dir.join(name)
}

/// Append `_suffix` to the file stem, keeping the extension.
fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}_{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// Pick a path that does not clobber an existing file.
///
/// Returns `path` unchanged if it is free or `overwrite` is set.
pub fn resolve_collision(path: &Path, overwrite: bool, timestamp: &str) -> PathBuf {
    if overwrite || !path.exists() {
        return path.to_path_buf();
    }

    let stamped = with_stem_suffix(path, timestamp);
    if !stamped.exists() {
        return stamped;
    }

    (1u32..)
        .map(|n| with_stem_suffix(path, &format!("{}_{}", timestamp, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(stamped)
}
