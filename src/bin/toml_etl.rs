use clap::Parser;
use drugsfda_etl::config::toml_config::TomlConfig;
use drugsfda_etl::core::ConfigProvider;
use drugsfda_etl::utils::{logger, validation::Validate};
use drugsfda_etl::{ApiPipeline, EtlEngine, FilePipeline, LocalStorage, RunReport};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Drugs@FDA ETL tool with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based ETL tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道，並運行ETL引擎
    let result: drugsfda_etl::Result<RunReport> = if config.is_api_source() {
        let storage = LocalStorage::new(config.output_path().to_string());
        let pipeline = ApiPipeline::new(storage, config);
        EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
            .run()
            .await
    } else {
        let input = LocalStorage::new(config.input_path().to_string());
        let output = LocalStorage::new(config.output_path().to_string());
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
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );

    if config.is_api_source() {
        println!("  Source: {} (limit {})", config.api_endpoint(), config.fetch_limit());
    } else {
        println!("  Source: {}/{}", config.input_path(), config.source_file());
    }

    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.load.output_formats.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Data Source Analysis:");
    if config.is_api_source() {
        println!("  Endpoint: {}", config.api_endpoint());
        println!("  Record limit: {}", config.fetch_limit());
    } else {
        println!("  Input file: {}/{}", config.input_path(), config.source_file());
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  JSON: {}/processed_raw_data.json", config.output_path());
    if config.csv_export() {
        println!("  CSV: {}/processed_products.csv", config.output_path());
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
