use clap::Parser;
use drugsfda_etl::utils::{logger, validation::Validate};
use drugsfda_etl::{ApiPipeline, CliConfig, EtlEngine, FilePipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting drugsfda-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道，並運行ETL引擎
    let result = if config.fetch {
        tracing::info!("📡 Source: API endpoint {}", config.api_endpoint);
        let storage = LocalStorage::new(config.output_path.clone());
        let pipeline = ApiPipeline::new(storage, config);
        EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
            .run()
            .await
    } else {
        tracing::info!(
            "📄 Source: local file {}/{}",
            config.input_path,
            config.source_file
        );
        let input = LocalStorage::new(config.input_path.clone());
        let output = LocalStorage::new(config.output_path.clone());
        let pipeline = FilePipeline::new(input, output, config);
        EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
            .run()
            .await
    };

    match result {
        Ok(report) => {
            tracing::info!("✅ ETL process completed successfully!");
            tracing::info!("📁 Output saved to: {}", report.output_path);
            println!("✅ ETL process completed successfully!");
            println!(
                "📊 Processed {} application records ({} products)",
                report.records_processed, report.products_processed
            );
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                drugsfda_etl::utils::error::ErrorSeverity::Low => 0,
                drugsfda_etl::utils::error::ErrorSeverity::Medium => 2,
                drugsfda_etl::utils::error::ErrorSeverity::High => 1,
                drugsfda_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
