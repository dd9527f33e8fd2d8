//! Human-readable summary of one decoded file.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::decode::{ScanCorrection, ScanFailure};
use crate::session::DecodeOutcome;

/// Summary of decoding one file: what was recovered and what was skipped.
#[derive(Debug, Clone)]
pub struct DecodeReport {
    /// Path of the decoded file
    pub file_path: String,
    /// Whether MS scan data was read; the scan summary is omitted otherwise
    pub scans_read: bool,
    /// Scans in the spectrum index
    pub scans_total: usize,
    /// Scans that decoded
    pub scans_decoded: usize,
    /// Peaks decoded
    pub peak_count: usize,
    /// Scans whose intensity width was corrected
    pub corrections: Vec<ScanCorrection>,
    /// Scans that were skipped
    pub failures: Vec<ScanFailure>,
    /// Files written for this input
    pub outputs: Vec<String>,
}

impl DecodeReport {
    /// Build a report from a decode outcome.
    pub fn new(file_path: impl Into<String>, outcome: &DecodeOutcome) -> Self {
        Self {
            file_path: file_path.into(),
            scans_read: outcome.scans_read,
            scans_total: outcome.scans_total,
            scans_decoded: outcome.scans_decoded,
            peak_count: outcome.peak_count,
            corrections: outcome.corrections.clone(),
            failures: outcome.failures.clone(),
            outputs: Vec::new(),
        }
    }

    /// Record a written output file.
    pub fn add_output(&mut self, path: impl Into<String>) {
        self.outputs.push(path.into());
    }

    /// Whether any scan was skipped.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Whether any scan needed a width correction.
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}: {}\n", style("File").bold(), self.file_path));
            if self.scans_read {
                output.push_str(&format!(
                    "  Scans: {} of {} decoded, {} peaks\n",
                    style(self.scans_decoded).green(),
                    self.scans_total,
                    self.peak_count
                ));
            }

            for correction in &self.corrections {
                output.push_str(&format!(
                    "  [{}] {} scan {} (index {}): n_bytes {} -> {}\n",
                    WARN,
                    style("Corrected").yellow(),
                    correction.scan,
                    correction.index,
                    correction.correction.declared,
                    correction.correction.resolved
                ));
            }
            for failure in &self.failures {
                output.push_str(&format!(
                    "  [{}] {} {}\n",
                    FAIL,
                    style("Skipped").red(),
                    failure
                ));
            }
            for path in &self.outputs {
                output.push_str(&format!("  [{}] Saved {}\n", OK, style(path).green()));
            }

            if self.has_failures() {
                output.push_str(&format!(
                    "  {}\n",
                    style(format!("{} scans skipped", self.failures.len())).red().bold()
                ));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.file_path)?;
        if self.scans_read {
            writeln!(
                f,
                "  Scans: {} of {} decoded, {} peaks",
                self.scans_decoded, self.scans_total, self.peak_count
            )?;
        }

        for correction in &self.corrections {
            writeln!(
                f,
                "  [⚠] Corrected scan {} (index {}): n_bytes {} -> {}",
                correction.scan,
                correction.index,
                correction.correction.declared,
                correction.correction.resolved
            )?;
        }
        for failure in &self.failures {
            writeln!(f, "  [✗] Skipped {}", failure)?;
        }
        for path in &self.outputs {
            writeln!(f, "  [✓] Saved {}", path)?;
        }

        if self.has_failures() {
            writeln!(f, "  {} scans skipped", self.failures.len())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ScanError, WidthCorrection};

    fn outcome() -> DecodeOutcome {
        DecodeOutcome {
            scans_read: true,
            scans_total: 3,
            scans_decoded: 2,
            peak_count: 5,
            corrections: vec![ScanCorrection {
                index: 0,
                offset: 0,
                scan: 1,
                correction: WidthCorrection {
                    declared: 1,
                    resolved: 4,
                },
            }],
            failures: vec![ScanFailure {
                index: 1,
                offset: 44,
                error: ScanError::TruncatedHeader { available: 3 },
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_report_counts() {
        let report = DecodeReport::new("run.qgd", &outcome());
        assert!(report.has_failures());
        assert!(report.has_corrections());
        assert_eq!(report.scans_decoded, 2);
    }

    #[test]
    fn test_report_display() {
        let mut report = DecodeReport::new("run.qgd", &outcome());
        report.add_output("output/run.csv");
        let text = report.to_string();

        assert!(text.contains("File: run.qgd"));
        assert!(text.contains("2 of 3 decoded, 5 peaks"));
        assert!(text.contains("n_bytes 1 -> 4"));
        assert!(text.contains("Skipped index 1 at offset 44"));
        assert!(text.contains("Saved output/run.csv"));
        assert!(text.contains("1 scans skipped"));
    }

    #[test]
    fn test_tic_only_report_has_no_scan_summary() {
        let mut report = DecodeReport::new("tic.qgd", &DecodeOutcome::default());
        report.add_output("output/tic.csv");
        let text = report.to_string();

        assert!(!text.contains("Scans:"));
        assert!(text.contains("Saved output/tic.csv"));
        #[cfg(feature = "colorized_output")]
        assert!(!report.format_colored().contains("Scans:"));
    }

    #[test]
    fn test_clean_report() {
        let report = DecodeReport::new("clean.qgd", &DecodeOutcome::default());
        assert!(!report.has_failures());
        assert!(!report.to_string().contains("skipped"));
    }
}
