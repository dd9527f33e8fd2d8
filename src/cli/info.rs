use anyhow::{Context, Result};
use std::path::PathBuf;

use qgd::container::{RETENTION_TIME_STREAM, TIC_DATA_STREAM};
use qgd::report::DecodeReport;
use qgd::session::{DecodeOutcome, QgdReader};

/// Display the streams and scan summary of a .qgd file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mut reader = QgdReader::open(&file).context("Failed to open .qgd file")?;

    println!("qgd File Information");
    println!("====================");
    println!("File: {}", file.display());
    println!();

    println!("Streams:");
    for (i, stream) in reader.container().streams().iter().enumerate() {
        println!("  {:3}. {} ({} bytes)", i + 1, stream.path, stream.len);
    }
    println!();

    if reader.container().has_stream(&RETENTION_TIME_STREAM)
        && reader.container().has_stream(&TIC_DATA_STREAM)
    {
        let tic = reader.read_tic().context("Failed to read TIC")?;
        println!("TIC points: {}", tic.len());
        if let (Some(first), Some(last)) = (tic.first(), tic.last()) {
            println!("Retention time: {} - {} min", first.rt_min, last.rt_min);
        }
        println!();
    }

    let aggregate = reader.read_scans(false).context("Failed to read MS data")?;
    let outcome = DecodeOutcome {
        scans_read: true,
        scans_total: aggregate.scans_decoded + aggregate.failures.len(),
        scans_decoded: aggregate.scans_decoded,
        peak_count: aggregate.rows.len(),
        corrections: aggregate.corrections,
        failures: aggregate.failures,
        ..Default::default()
    };
    let report = DecodeReport::new(file.display().to_string(), &outcome);

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
