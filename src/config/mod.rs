pub mod cli;
pub mod server_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::ParseMode;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_output_formats, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "echo-ingest")]
#[command(about = "Normalize a prospect CSV and export it as CSV/TSV/JSON")]
pub struct CliConfig {
    #[arg(long, help = "Prospect CSV file to ingest")]
    pub input_file: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Honour quoted fields (RFC 4180) instead of plain comma splitting")]
    pub strict: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log phase timings and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_file", &self.input_file)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("formats", &self.formats)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_defaults() {
        let config = CliConfig::parse_from(["echo-ingest", "--input-file", "leads.csv"]);
        assert_eq!(config.output_path, "./output");
        assert_eq!(config.formats, vec!["csv", "json"]);
        assert_eq!(config.parse_mode(), ParseMode::Lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_cli_overrides() {
        let config = CliConfig::parse_from([
            "echo-ingest",
            "--input-file",
            "leads.csv",
            "--formats",
            "tsv,xml",
            "--strict",
        ]);
        assert_eq!(config.parse_mode(), ParseMode::Strict);
        assert!(config.validate().is_err());
    }
}
