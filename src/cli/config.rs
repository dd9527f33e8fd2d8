//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file:
//!
//! ```toml
//! # qgd.toml
//! [conversion]
//! what = ["ms1", "tic"]
//! format = "long"
//! output_dir = "results"
//! overwrite = false
//! parallel = true
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use qgd::table::{OutputKind, TableShape};

/// Root configuration structure for qgd.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the convert command.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionConfig {
    /// Outputs to extract.
    pub what: Option<Vec<OutputKind>>,

    /// MS1 table layout.
    pub format: Option<TableShape>,

    /// Directory receiving the CSV files.
    pub output_dir: Option<PathBuf>,

    /// Replace existing files instead of adding a timestamp.
    pub overwrite: Option<bool>,

    /// Decode scan blocks in parallel.
    pub parallel: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [conversion]
            what = ["ms1", "tic"]
            format = "long"
            output_dir = "results"
            overwrite = true
            parallel = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(
            config.conversion.what,
            Some(vec![OutputKind::Ms1, OutputKind::Tic])
        );
        assert_eq!(config.conversion.format, Some(TableShape::Long));
        assert_eq!(config.conversion.output_dir, Some(PathBuf::from("results")));
        assert_eq!(config.conversion.overwrite, Some(true));
        assert_eq!(config.conversion.parallel, Some(true));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [conversion]
            format = "wide"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.conversion.format, Some(TableShape::Wide));
        assert_eq!(config.conversion.what, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(config.conversion.output_dir.is_none());
    }

    #[test]
    fn test_unknown_output_kind_rejected() {
        let toml = r#"
            [conversion]
            what = ["ms2"]
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
