use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One projected Drugs@FDA application record. Field declaration order here
/// is the key order of the serialized output.
///
/// Scalar fields hold raw JSON values: whatever type the source carried is
/// passed through verbatim, and absent fields default to `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub application_number: Value,
    pub sponsor_name: Value,
    pub products: Vec<ProcessedProduct>,
}

/// One projected drug product nested inside an application record.
/// `active_ingredients` defaults to `[]`, every other field to `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedProduct {
    pub product_number: Value,
    pub reference_drug: Value,
    pub brand_name: Value,
    pub active_ingredients: Value,
    pub reference_standard: Value,
    pub dosage_form: Value,
    pub route: Value,
    pub marketing_status: Value,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ProcessedRecord>,
    pub csv_output: String,
}

/// Success value of a full ETL run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_path: String,
    pub records_processed: usize,
    pub products_processed: usize,
}
