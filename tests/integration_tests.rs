use drugsfda_etl::{CliConfig, EtlEngine, FilePipeline, LocalStorage};
use serde_json::json;
use tempfile::TempDir;

fn test_config(input_path: &str, output_path: &str) -> CliConfig {
    CliConfig {
        input_path: input_path.to_string(),
        source_file: "raw_data.json".to_string(),
        output_path: output_path.to_string(),
        api_endpoint: "https://api.fda.gov/drug/drugsfda.json".to_string(),
        limit: 100,
        fetch: false,
        csv: false,
        verbose: false,
        monitor: false,
    }
}

fn file_pipeline(
    input_path: &str,
    output_path: &str,
    csv: bool,
) -> FilePipeline<LocalStorage, CliConfig> {
    let mut config = test_config(input_path, output_path);
    config.csv = csv;

    let input = LocalStorage::new(input_path.to_string());
    let output = LocalStorage::new(output_path.to_string());
    FilePipeline::new(input, output, config)
}

#[tokio::test]
async fn test_end_to_end_file_run() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("raw");
    let output_path = temp_dir.path().join("processed");
    std::fs::create_dir_all(&input_path).unwrap();

    let raw_data = json!({
        "meta": {"results": {"skip": 0, "limit": 2, "total": 2}},
        "results": [
            {
                "application_number": "NDA021436",
                "sponsor_name": "ACME PHARMA",
                "openfda": {"manufacturer_name": ["ACME"]},
                "products": [
                    {
                        "product_number": "001",
                        "reference_drug": "Yes",
                        "brand_name": "PAINAWAY",
                        "active_ingredients": [{"name": "IBUPROFEN", "strength": "200MG"}],
                        "reference_standard": "Yes",
                        "dosage_form": "TABLET",
                        "route": "ORAL",
                        "marketing_status": "Prescription",
                        "te_code": "AB"
                    },
                    {"product_number": "002"}
                ]
            },
            {"application_number": "ANDA076543", "sponsor_name": "GENERIC CO"}
        ]
    });
    std::fs::write(
        input_path.join("raw_data.json"),
        serde_json::to_string(&raw_data).unwrap(),
    )
    .unwrap();

    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        false,
    );
    let engine = EtlEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    assert_eq!(report.records_processed, 2);
    assert_eq!(report.products_processed, 2);
    assert!(report.output_path.ends_with("processed_raw_data.json"));

    let output_file = output_path.join("processed_raw_data.json");
    assert!(output_file.exists());

    let text = std::fs::read_to_string(&output_file).unwrap();

    // 4-space indentation on the serialized records
    assert!(text.contains("    {\n"));
    assert!(text.contains("        \"application_number\": \"NDA021436\""));

    let records: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);

    // whitelisted fields survive, extras are dropped, absents are defaulted
    assert_eq!(records[0]["sponsor_name"], "ACME PHARMA");
    assert!(records[0].get("openfda").is_none());
    assert_eq!(records[0]["products"][0]["brand_name"], "PAINAWAY");
    assert!(records[0]["products"][0].get("te_code").is_none());
    assert_eq!(records[0]["products"][1]["brand_name"], "");
    assert_eq!(records[0]["products"][1]["active_ingredients"], json!([]));
    assert_eq!(records[1]["products"], json!([]));
}

#[tokio::test]
async fn test_output_directory_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("raw");
    let output_path = temp_dir.path().join("does").join("not").join("exist");
    std::fs::create_dir_all(&input_path).unwrap();

    std::fs::write(input_path.join("raw_data.json"), "{\"results\": []}").unwrap();

    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        false,
    );
    let report = EtlEngine::new(pipeline).run().await.unwrap();

    assert_eq!(report.records_processed, 0);
    assert!(output_path.join("processed_raw_data.json").exists());

    let text = std::fs::read_to_string(output_path.join("processed_raw_data.json")).unwrap();
    assert_eq!(text, "[]");
}

#[tokio::test]
async fn test_missing_input_file_fails_without_panic() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("raw");
    let output_path = temp_dir.path().join("processed");
    std::fs::create_dir_all(&input_path).unwrap();

    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        false,
    );
    let result = EtlEngine::new(pipeline).run().await;

    assert!(result.is_err());
    assert!(!result.unwrap_err().to_string().is_empty());
    assert!(!output_path.join("processed_raw_data.json").exists());
}

#[tokio::test]
async fn test_malformed_json_fails_without_panic() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("raw");
    let output_path = temp_dir.path().join("processed");
    std::fs::create_dir_all(&input_path).unwrap();

    std::fs::write(input_path.join("raw_data.json"), "{\"results\": [oops").unwrap();

    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        false,
    );
    let result = EtlEngine::new(pipeline).run().await;

    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Serialization error"));
    assert!(!output_path.join("processed_raw_data.json").exists());
}

#[tokio::test]
async fn test_rerun_overwrites_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("raw");
    let output_path = temp_dir.path().join("processed");
    std::fs::create_dir_all(&input_path).unwrap();

    let raw_file = input_path.join("raw_data.json");
    let output_file = output_path.join("processed_raw_data.json");

    std::fs::write(
        &raw_file,
        "{\"results\": [{\"application_number\": \"NDA000001\"}]}",
    )
    .unwrap();
    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        false,
    );
    EtlEngine::new(pipeline).run().await.unwrap();
    let first = std::fs::read_to_string(&output_file).unwrap();
    assert!(first.contains("NDA000001"));

    std::fs::write(
        &raw_file,
        "{\"results\": [{\"application_number\": \"ANDA000002\"}]}",
    )
    .unwrap();
    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        false,
    );
    EtlEngine::new(pipeline).run().await.unwrap();
    let second = std::fs::read_to_string(&output_file).unwrap();

    assert!(second.contains("ANDA000002"));
    assert!(!second.contains("NDA000001"));
}

#[tokio::test]
async fn test_csv_export_writes_flat_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("raw");
    let output_path = temp_dir.path().join("processed");
    std::fs::create_dir_all(&input_path).unwrap();

    let raw_data = json!({
        "results": [{
            "application_number": "NDA021436",
            "sponsor_name": "ACME PHARMA",
            "products": [{
                "product_number": "001",
                "brand_name": "PAINAWAY",
                "dosage_form": "TABLET",
                "route": "ORAL",
                "marketing_status": "Prescription",
                "active_ingredients": [{"name": "IBUPROFEN", "strength": "200MG"}]
            }]
        }]
    });
    std::fs::write(
        input_path.join("raw_data.json"),
        serde_json::to_string(&raw_data).unwrap(),
    )
    .unwrap();

    let pipeline = file_pipeline(
        input_path.to_str().unwrap(),
        output_path.to_str().unwrap(),
        true,
    );
    EtlEngine::new(pipeline).run().await.unwrap();

    let csv_file = output_path.join("processed_products.csv");
    assert!(csv_file.exists());

    let csv_text = std::fs::read_to_string(&csv_file).unwrap();
    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "application_number,sponsor_name,product_number,brand_name,dosage_form,route,marketing_status,active_ingredients"
    );
    assert_eq!(
        lines[1],
        "NDA021436,ACME PHARMA,001,PAINAWAY,TABLET,ORAL,Prescription,IBUPROFEN"
    );
}
