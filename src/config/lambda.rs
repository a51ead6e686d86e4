#[cfg(feature = "lambda")]
use crate::config::DEFAULT_API_ENDPOINT;
#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, Storage};
#[cfg(feature = "lambda")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub s3_input_prefix: String,
    pub s3_output_prefix: String,
    pub s3_region: String,
    pub source_type: String,
    pub source_file: String,
    pub api_endpoint: String,
    pub fetch_limit: usize,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("S3_BUCKET").map_err(|_| EtlError::ConfigError {
                message: "S3_BUCKET environment variable is required".to_string(),
            })?,
            s3_input_prefix: env::var("S3_INPUT_PREFIX")
                .unwrap_or_else(|_| "raw-data".to_string()),
            s3_output_prefix: env::var("S3_OUTPUT_PREFIX")
                .unwrap_or_else(|_| "etl-output".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            source_type: env::var("SOURCE_TYPE").unwrap_or_else(|_| "file".to_string()),
            source_file: env::var("SOURCE_FILE").unwrap_or_else(|_| "raw_data.json".to_string()),
            api_endpoint: env::var("API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string()),
            fetch_limit: env::var("FETCH_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
        })
    }

    pub fn is_api_source(&self) -> bool {
        self.source_type == "api"
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn input_path(&self) -> &str {
        &self.s3_input_prefix
    }

    fn source_file(&self) -> &str {
        &self.source_file
    }

    fn output_path(&self) -> &str {
        &self.s3_output_prefix
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn fetch_limit(&self) -> usize {
        self.fetch_limit
    }

    fn csv_export(&self) -> bool {
        false
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("s3_input_prefix", &self.s3_input_prefix)?;
        validate_non_empty_string("s3_output_prefix", &self.s3_output_prefix)?;
        validate_aws_region("s3_region", &self.s3_region)?;

        match self.source_type.as_str() {
            "file" => validate_source_filename("source_file", &self.source_file)?,
            "api" => {
                validate_url("api_endpoint", &self.api_endpoint)?;
                validate_range("fetch_limit", self.fetch_limit, 1, 1000)?;
            }
            other => {
                return Err(EtlError::InvalidConfigValueError {
                    field: "source_type".to_string(),
                    value: other.to_string(),
                    reason: "Source type must be 'file' or 'api'".to_string(),
                });
            }
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot be empty".to_string(),
        });
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    prefix: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn key(&self, path: &str) -> String {
        if self.prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), path)
        }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let key = self.key(path);

        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| EtlError::StorageError {
                message: format!("Failed to read s3://{}/{}: {}", self.bucket, key, e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| EtlError::StorageError {
                message: format!("Failed to collect s3://{}/{}: {}", self.bucket, key, e),
            })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let key = self.key(path);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| EtlError::StorageError {
                message: format!("Failed to write s3://{}/{}: {}", self.bucket, key, e),
            })?;

        Ok(())
    }
}
