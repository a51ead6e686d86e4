#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use drugsfda_etl::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use drugsfda_etl::core::{api_pipeline::ApiPipeline, etl::EtlEngine, pipeline::FilePipeline};
#[cfg(feature = "lambda")]
use drugsfda_etl::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub s3_bucket: Option<String>,
    pub s3_input_prefix: Option<String>,
    pub s3_output_prefix: Option<String>,
    pub source_file: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub output_path: String,
    pub records_processed: usize,
    pub products_processed: usize,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting drugsfda-etl Lambda function");

    // 設置環境變量 (如果事件中有的話)
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(prefix) = &event.payload.s3_input_prefix {
        std::env::set_var("S3_INPUT_PREFIX", prefix);
    }
    if let Some(prefix) = &event.payload.s3_output_prefix {
        std::env::set_var("S3_OUTPUT_PREFIX", prefix);
    }
    if let Some(source_file) = &event.payload.source_file {
        std::env::set_var("SOURCE_FILE", source_file);
    }

    // 創建Lambda配置
    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    // 創建存儲和管道，並運行ETL
    let output = S3Storage::new(
        s3_client.clone(),
        lambda_config.s3_bucket.clone(),
        lambda_config.s3_output_prefix.clone(),
    );

    let report = if lambda_config.is_api_source() {
        let pipeline = ApiPipeline::new(output, lambda_config);
        EtlEngine::new(pipeline)
            .run()
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?
    } else {
        let input = S3Storage::new(
            s3_client,
            lambda_config.s3_bucket.clone(),
            lambda_config.s3_input_prefix.clone(),
        );
        let pipeline = FilePipeline::new(input, output, lambda_config);
        EtlEngine::new(pipeline)
            .run()
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?
    };

    let response = Response {
        message: "ETL process completed successfully".to_string(),
        output_path: report.output_path,
        records_processed: report.records_processed,
        products_processed: report.products_processed,
    };

    tracing::info!("drugsfda-etl Lambda function completed successfully");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
