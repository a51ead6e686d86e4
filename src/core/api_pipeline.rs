use crate::core::{export, projector, ConfigProvider, Pipeline, Storage, CSV_FILENAME, OUTPUT_FILENAME};
use crate::domain::model::{RunReport, TransformResult};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Pipeline over a Drugs@FDA-style HTTP endpoint: fetches the raw document
/// instead of reading it from disk. Transform and load behave exactly like
/// [`FilePipeline`](crate::core::pipeline::FilePipeline).
pub struct ApiPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ApiPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn request_url(&self) -> Result<Url> {
        let mut url =
            Url::parse(self.config.api_endpoint()).map_err(|e| EtlError::ConfigError {
                message: format!("Invalid API endpoint: {}", e),
            })?;

        url.query_pairs_mut()
            .append_pair("limit", &self.config.fetch_limit().to_string());

        Ok(url)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ApiPipeline<S, C> {
    async fn extract(&self) -> Result<Value> {
        let url = self.request_url()?;
        tracing::debug!("Fetching raw data from: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(EtlError::ProcessingError {
                message: format!("API returned status {} for {}", response.status(), url),
            });
        }

        let raw = response.json::<Value>().await?;
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
        self.storage.write_file(OUTPUT_FILENAME, &json_bytes).await?;

        if self.config.csv_export() {
            self.storage
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
