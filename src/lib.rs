pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::cli::LocalStorage;

#[cfg(feature = "lambda")]
pub use crate::config::lambda::{LambdaConfig, S3Storage};

pub use crate::core::{api_pipeline::ApiPipeline, etl::EtlEngine, pipeline::FilePipeline};
pub use crate::domain::model::{ProcessedProduct, ProcessedRecord, RunReport};
pub use crate::utils::error::{EtlError, Result};
