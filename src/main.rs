//! # qgd Converter
//!
//! A command-line tool for converting Shimadzu GCMS `.qgd` files to CSV.
//!
//! ## Usage
//!
//! ```bash
//! # Convert every .qgd file in ./input to wide MS1 tables in ./output
//! qgd-convert convert
//!
//! # TIC and long-format MS1 for one file
//! qgd-convert convert run01.qgd --what tic,ms1 --format long
//!
//! # List streams and scan health
//! qgd-convert info run01.qgd
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
