//! Compound-document container access.
//!
//! A `.qgd` file is an OLE compound document. The decoder only needs four
//! streams, all stored under the `GCMS Raw Data` storage:
//!
//! | Stream | Layout |
//! |--------|--------|
//! | `Retention Time` | packed i32 LE, milliseconds |
//! | `TIC Data` | packed i64 LE |
//! | `Spectrum Index` | packed u32 LE byte offsets into `MS Raw Data` |
//! | `MS Raw Data` | 32-byte scan header + peak list, per scan |
//!
//! Streams are always read whole; their size is bounded by the run length.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::QgdError;

/// Storage holding all GCMS streams.
pub const RAW_DATA_STORAGE: &str = "GCMS Raw Data";

/// Path of the retention-time stream.
pub const RETENTION_TIME_STREAM: [&str; 2] = [RAW_DATA_STORAGE, "Retention Time"];
/// Path of the TIC intensity stream.
pub const TIC_DATA_STREAM: [&str; 2] = [RAW_DATA_STORAGE, "TIC Data"];
/// Path of the spectrum offset index stream.
pub const SPECTRUM_INDEX_STREAM: [&str; 2] = [RAW_DATA_STORAGE, "Spectrum Index"];
/// Path of the concatenated scan-block stream.
pub const MS_RAW_DATA_STREAM: [&str; 2] = [RAW_DATA_STORAGE, "MS Raw Data"];

/// One stream entry as listed by [`QgdContainer::streams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEntry {
    /// Slash-joined path inside the container, without a leading slash
    pub path: String,
    /// Stream length in bytes
    pub len: u64,
}

/// Exclusive handle over an opened compound document.
///
/// The underlying file is released when the container is dropped.
pub struct QgdContainer<F = File> {
    inner: cfb::CompoundFile<F>,
}

impl QgdContainer<File> {
    /// Open a compound document on disk.
    ///
    /// # Errors
    /// `QgdError::ContainerOpen` if the file cannot be opened or is not a
    /// valid compound document.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, QgdError> {
        let path = path.as_ref();
        let inner = cfb::open(path).map_err(|source| QgdError::ContainerOpen {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Opened compound document {}", path.display());
        Ok(Self { inner })
    }
}

impl<F: Read + Seek> QgdContainer<F> {
    /// Open a compound document from any seekable reader.
    pub fn from_reader(reader: F) -> Result<Self, QgdError> {
        let inner = cfb::CompoundFile::open(reader).map_err(|source| QgdError::ContainerOpen {
            path: "<reader>".to_string(),
            source,
        })?;
        Ok(Self { inner })
    }

    /// Whether a stream exists at the given path.
    pub fn has_stream(&self, segments: &[&str]) -> bool {
        self.inner.is_stream(stream_path(segments))
    }

    /// Read a whole stream into memory.
    ///
    /// # Errors
    /// `QgdError::StreamNotFound` naming the joined path if the stream is absent.
    pub fn read_stream(&mut self, segments: &[&str]) -> Result<Vec<u8>, QgdError> {
        let path = stream_path(segments);
        if !self.inner.is_stream(&path) {
            return Err(QgdError::StreamNotFound(segments.join("/")));
        }

        let mut stream = self.inner.open_stream(&path)?;
        let mut buf = Vec::with_capacity(stream.len() as usize);
        stream.read_to_end(&mut buf)?;

        debug!("Read stream {} ({} bytes)", segments.join("/"), buf.len());
        Ok(buf)
    }

    /// List every stream in the container, in directory order.
    pub fn streams(&self) -> Vec<StreamEntry> {
        self.inner
            .walk()
            .filter(|entry| entry.is_stream())
            .map(|entry| StreamEntry {
                path: entry
                    .path()
                    .to_string_lossy()
                    .trim_start_matches('/')
                    .to_string(),
                len: entry.len(),
            })
            .collect()
    }
}

impl<F> std::fmt::Debug for QgdContainer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QgdContainer").finish_non_exhaustive()
    }
}

fn stream_path(segments: &[&str]) -> PathBuf {
    let mut path = PathBuf::from("/");
    path.extend(segments);
    path
}
