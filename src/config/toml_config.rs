use crate::config::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// "file" reads `<input_path>/<filename>`, "api" fetches from `endpoint`
    pub r#type: String,
    pub input_path: Option<String>,
    pub filename: Option<String>,
    pub endpoint: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn is_api_source(&self) -> bool {
        self.source.r#type == "api"
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.source.input_path.as_deref().unwrap_or("./data/raw")
    }

    fn source_file(&self) -> &str {
        self.source.filename.as_deref().unwrap_or("raw_data.json")
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn api_endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn fetch_limit(&self) -> usize {
        self.source.limit.unwrap_or(100)
    }

    fn csv_export(&self) -> bool {
        self.load.output_formats.iter().any(|f| f == "csv")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        match self.source.r#type.as_str() {
            "file" => {
                validation::validate_path("source.input_path", self.input_path())?;
                validation::validate_source_filename("source.filename", self.source_file())?;
            }
            "api" => {
                validation::validate_url("source.endpoint", self.api_endpoint())?;
                validation::validate_range("source.limit", self.fetch_limit(), 1, 1000)?;
            }
            other => {
                return Err(EtlError::InvalidConfigValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Source type must be 'file' or 'api'".to_string(),
                });
            }
        }

        validation::validate_path("load.output_path", &self.load.output_path)?;

        for format in &self.load.output_formats {
            if format != "json" && format != "csv" {
                return Err(EtlError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: "Supported output formats: json, csv".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_SOURCE: &str = r#"
[pipeline]
name = "drugsfda-batch"
description = "Project Drugs@FDA raw data"
version = "1.0"

[source]
type = "file"
input_path = "./data/raw"
filename = "raw_data.json"

[load]
output_path = "./data/processed"
output_formats = ["json", "csv"]
"#;

    #[test]
    fn test_parse_file_source() {
        let config = TomlConfig::from_str(FILE_SOURCE).unwrap();

        assert!(!config.is_api_source());
        assert_eq!(config.source_file(), "raw_data.json");
        assert!(config.csv_export());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_source_defaults() {
        let config = TomlConfig::from_str(
            r#"
[pipeline]
name = "drugsfda-fetch"
description = "Fetch and project Drugs@FDA data"
version = "1.0"

[source]
type = "api"

[load]
output_path = "./data/processed"
output_formats = ["json"]

[monitoring]
enabled = true
"#,
        )
        .unwrap();

        assert!(config.is_api_source());
        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.fetch_limit(), 100);
        assert!(!config.csv_export());
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(TomlConfig::from_str("not toml at all [").is_err());
    }

    #[test]
    fn test_unknown_source_type_is_rejected() {
        let config = TomlConfig::from_str(&FILE_SOURCE.replace("\"file\"", "\"ftp\"")).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let config = TomlConfig::from_str(&FILE_SOURCE.replace("\"csv\"", "\"xml\"")).unwrap();
        assert!(config.validate().is_err());
    }
}
