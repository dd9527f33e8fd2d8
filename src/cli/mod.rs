use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use qgd::table::{OutputKind, TableShape};

mod config;
mod convert;
mod info;

/// qgd - Shimadzu GCMS .qgd to CSV converter
#[derive(Parser)]
#[command(name = "qgd-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Data product to extract.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputArg {
    /// Total ion chromatogram
    Tic,
    /// MS1 spectra
    Ms1,
}

/// Layout of MS1 tables.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShapeArg {
    /// One row per scan, one column per rounded m/z
    Wide,
    /// One row per peak
    Long,
}

impl From<OutputArg> for OutputKind {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Tic => OutputKind::Tic,
            OutputArg::Ms1 => OutputKind::Ms1,
        }
    }
}

impl From<ShapeArg> for TableShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Wide => TableShape::Wide,
            ShapeArg::Long => TableShape::Long,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert .qgd files to CSV
    Convert {
        /// Input .qgd files or directories (defaults to ./input)
        #[arg(value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to ./output)
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output file name (single input and single output kind only)
        #[arg(short = 'n', long, value_name = "NAME")]
        name: Option<PathBuf>,

        /// Data to extract; repeat or comma-separate for both (default: ms1)
        #[arg(short = 'w', long = "what", value_enum, value_delimiter = ',')]
        what: Vec<OutputArg>,

        /// MS1 table layout (default: wide)
        #[arg(short = 'f', long, value_enum)]
        format: Option<ShapeArg>,

        /// Replace existing output files instead of adding a timestamp
        #[arg(long)]
        overwrite: bool,

        /// Decode scan blocks in parallel (requires the parallel feature)
        #[arg(long)]
        parallel: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display the streams and scan summary of a .qgd file
    Info {
        /// Input .qgd file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            inputs,
            output_dir,
            name,
            what,
            format,
            overwrite,
            parallel,
            config,
        } => convert::run(convert::ConvertArgs {
            inputs,
            output_dir,
            name,
            what: what.into_iter().map(OutputKind::from).collect(),
            format: format.map(TableShape::from),
            overwrite,
            parallel,
            config,
        }),
        Commands::Info { file } => info::run(file),
    }
}
