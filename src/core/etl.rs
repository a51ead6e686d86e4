use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting ETL process...");

        tracing::info!("Extracting raw data...");
        let raw = self.pipeline.extract().await?;
        self.monitor.log_stage("Extract");

        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Projected {} application records",
            transformed.records.len()
        );
        self.monitor.log_stage("Transform");

        tracing::info!("Loading data...");
        let report = self.pipeline.load(transformed).await?;
        tracing::info!(
            "Saved {} records ({} products) to: {}",
            report.records_processed,
            report.products_processed,
            report.output_path
        );
        self.monitor.log_stage("Load");

        self.monitor.log_summary();
        Ok(report)
    }
}
