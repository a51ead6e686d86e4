use crate::core::{export, projector, ConfigProvider, Pipeline, Storage, CSV_FILENAME, OUTPUT_FILENAME};
use crate::domain::model::{RunReport, TransformResult};
use crate::utils::error::Result;
use serde_json::Value;

/// Pipeline over local raw data: reads `<input_path>/<source_file>`, projects
/// it, and writes the processed output under `<output_path>`.
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        Self {
            input,
            output,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FilePipeline<S, C> {
    async fn extract(&self) -> Result<Value> {
        tracing::debug!(
            "Reading raw data from: {}/{}",
            self.config.input_path(),
            self.config.source_file()
        );

        let bytes = self.input.read_file(self.config.source_file()).await?;
        let raw = serde_json::from_slice(&bytes)?;
        Ok(raw)
    }

    async fn transform(&self, raw: Value) -> Result<TransformResult> {
        let records = projector::project_document(&raw);
        tracing::debug!("Projected {} application records", records.len());

        let csv_output = export::render_products_csv(&records)?;
        Ok(TransformResult {
            records,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<RunReport> {
        let json_bytes = export::to_pretty_json(&result.records)?;

        tracing::debug!(
            "Writing {} bytes to {}/{}",
            json_bytes.len(),
            self.config.output_path(),
            OUTPUT_FILENAME
        );
        self.output.write_file(OUTPUT_FILENAME, &json_bytes).await?;

        if self.config.csv_export() {
            self.output
                .write_file(CSV_FILENAME, result.csv_output.as_bytes())
                .await?;
        }

        Ok(RunReport {
            output_path: format!("{}/{}", self.config.output_path(), OUTPUT_FILENAME),
            records_processed: result.records.len(),
            products_processed: result.records.iter().map(|r| r.products.len()).sum(),
        })
    }
}
