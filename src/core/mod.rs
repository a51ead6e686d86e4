pub mod api_pipeline;
pub mod etl;
pub mod export;
pub mod pipeline;
pub mod projector;

pub use crate::domain::model::{ProcessedProduct, ProcessedRecord, RunReport, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

/// Fixed output filename; every run overwrites the previous one.
pub const OUTPUT_FILENAME: &str = "processed_raw_data.json";
pub const CSV_FILENAME: &str = "processed_products.csv";
