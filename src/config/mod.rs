pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.fda.gov/drug/drugsfda.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "drugsfda-etl")]
#[command(about = "ETL tool for Drugs@FDA application data")]
pub struct CliConfig {
    #[arg(long, default_value = "./data/raw")]
    pub input_path: String,

    #[arg(long, default_value = "raw_data.json")]
    pub source_file: String,

    #[arg(long, default_value = "./data/processed")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = "100")]
    pub limit: usize,

    #[arg(long, help = "Fetch raw data from the API instead of reading a local file")]
    pub fetch: bool,

    #[arg(long, help = "Also write a flattened products CSV")]
    pub csv: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn source_file(&self) -> &str {
        &self.source_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn fetch_limit(&self) -> usize {
        self.limit
    }

    fn csv_export(&self) -> bool {
        self.csv
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_source_filename("source_file", &self.source_file)?;

        if self.fetch {
            validation::validate_url("api_endpoint", &self.api_endpoint)?;
            validation::validate_range("limit", self.limit, 1, 1000)?;
        }

        Ok(())
    }
}
