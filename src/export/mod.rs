//! Writing decoded tables to disk.
//!
//! - [`writer`]: CSV writers for TIC, MS1 long and MS1 wide tables
//! - [`naming`]: default output names and collision avoidance

pub mod error;
pub mod naming;
pub mod writer;

pub use writer::{write_long, write_output, write_output_file, write_tic, write_wide};
pub use error::ExportError;
pub use naming::{default_output_path, ensure_csv_extension, resolve_collision, timestamp};
