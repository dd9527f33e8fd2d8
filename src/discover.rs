//! Locate `.qgd` input files.

use std::path::{Path, PathBuf};

use log::debug;

use crate::export::ExportError;

/// Extension of GCMS data files.
pub const QGD_EXTENSION: &str = "qgd";

/// Directory scanned when no inputs are given.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Whether a path carries a `.qgd` extension (case-insensitive).
pub fn is_qgd(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(QGD_EXTENSION))
}

/// `.qgd` files directly inside `dir`, sorted by path.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_qgd(&path) {
            files.push(path);
        }
    }
    files.sort();
    debug!("Found {} .qgd files in {}", files.len(), dir.display());
    Ok(files)
}

/// Resolve one user-supplied path to the files it denotes.
///
/// Directories expand to their `.qgd` files. A missing path without an
/// extension is retried with `.qgd` appended.
pub fn resolve_input(path: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if path.is_dir() {
        return scan_directory(path);
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.extension().is_none() {
        let with_ext = path.with_extension(QGD_EXTENSION);
        if with_ext.is_file() {
            return Ok(vec![with_ext]);
        }
    }
    Err(ExportError::InputNotFound(path.display().to_string()))
}

/// Resolve every input, falling back to [`DEFAULT_INPUT_DIR`] when empty.
///
/// Duplicates are kept in first-seen order only once.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ExportError> {
    if inputs.is_empty() {
        return resolve_input(Path::new(DEFAULT_INPUT_DIR));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        for file in resolve_input(input)? {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }
    Ok(files)
}
