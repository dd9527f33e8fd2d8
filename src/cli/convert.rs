use anyhow::{Context, Result};
use log::{error, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use qgd::discover::discover_inputs;
use qgd::export::{
    default_output_path, ensure_csv_extension, resolve_collision, timestamp, write_output_file,
};
use qgd::report::DecodeReport;
use qgd::session::{decode_file, DecodeRequest};
use qgd::table::{OutputKind, TableShape};

use super::config::Config;

/// Directory receiving CSV files when none is configured.
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Arguments of the convert command as given on the command line.
pub struct ConvertArgs {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub name: Option<PathBuf>,
    pub what: Vec<OutputKind>,
    pub format: Option<TableShape>,
    pub overwrite: bool,
    pub parallel: bool,
    pub config: Option<PathBuf>,
}

/// Settings after merging flags, config file and defaults.
#[derive(Debug, PartialEq)]
struct Settings {
    output_dir: PathBuf,
    request: DecodeRequest,
    overwrite: bool,
}

fn resolve_settings(args: &ConvertArgs, config: &Config) -> Settings {
    let conversion = &config.conversion;

    let outputs: BTreeSet<OutputKind> = if !args.what.is_empty() {
        args.what.iter().copied().collect()
    } else {
        conversion
            .what
            .as_ref()
            .filter(|what| !what.is_empty())
            .map(|what| what.iter().copied().collect())
            .unwrap_or_else(|| BTreeSet::from([OutputKind::Ms1]))
    };

    Settings {
        output_dir: args
            .output_dir
            .clone()
            .or_else(|| conversion.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        request: DecodeRequest {
            outputs,
            shape: args.format.or(conversion.format).unwrap_or_default(),
            parallel: args.parallel || conversion.parallel.unwrap_or(false),
        },
        overwrite: args.overwrite || conversion.overwrite.unwrap_or(false),
    }
}

/// Convert .qgd files to CSV
pub fn run(args: ConvertArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let settings = resolve_settings(&args, &config);

    let files = discover_inputs(&args.inputs).context("Failed to locate input files")?;
    if files.is_empty() {
        anyhow::bail!("No .qgd files found");
    }
    if args.name.is_some() && (files.len() > 1 || settings.request.outputs.len() > 1) {
        anyhow::bail!("--name requires a single input file and a single output kind");
    }

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;

    info!("qgd Converter - .qgd to CSV");
    info!("===========================");
    info!("Inputs: {} file(s)", files.len());
    info!("Output directory: {}", settings.output_dir.display());
    info!(
        "Outputs: {}",
        settings
            .request
            .outputs
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("Format: {:?}", settings.request.shape);

    let mut failed = 0usize;
    for file in &files {
        if let Err(e) = convert_file(file, args.name.as_deref(), &settings) {
            error!("{}: {:#}", file.display(), e);
            eprintln!("Error: {}: {:#}", file.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files failed to convert", failed, files.len());
    }
    Ok(())
}

fn convert_file(input: &Path, name: Option<&Path>, settings: &Settings) -> Result<()> {
    let outcome = decode_file(input, &settings.request)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let mut report = DecodeReport::new(input.display().to_string(), &outcome);
    let several = outcome.outputs.len() > 1;

    for output in &outcome.outputs {
        let target = match name {
            Some(name) => settings.output_dir.join(ensure_csv_extension(name)),
            None => default_output_path(
                &settings.output_dir,
                input,
                several.then_some(output.kind()),
            ),
        };
        let target = resolve_collision(&target, settings.overwrite, &timestamp());

        let rows = write_output_file(&target, output)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!("Wrote {} {} rows to {}", rows, output.kind(), target.display());
        report.add_output(target.display().to_string());
    }

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    Ok(())
}
