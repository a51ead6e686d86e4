use crate::domain::model::{ProcessedProduct, ProcessedRecord};
use serde_json::Value;

/// Projects a raw Drugs@FDA document onto the fixed output field set.
///
/// The document shape is `{ "results": [ { ...application, "products": [...] } ] }`.
/// Output order follows input order. Fields are copied verbatim when present,
/// whatever their type; absent fields become `""` (`[]` for
/// `active_ingredients`). A `results` or `products` value that is not an
/// array projects to the empty sequence.
pub fn project_document(raw: &Value) -> Vec<ProcessedRecord> {
    raw.get("results")
        .and_then(Value::as_array)
        .map(|results| results.iter().map(project_record).collect())
        .unwrap_or_default()
}

fn project_record(result: &Value) -> ProcessedRecord {
    ProcessedRecord {
        application_number: field_or_empty(result, "application_number"),
        sponsor_name: field_or_empty(result, "sponsor_name"),
        products: result
            .get("products")
            .and_then(Value::as_array)
            .map(|products| products.iter().map(project_product).collect())
            .unwrap_or_default(),
    }
}

fn project_product(product: &Value) -> ProcessedProduct {
    ProcessedProduct {
        product_number: field_or_empty(product, "product_number"),
        reference_drug: field_or_empty(product, "reference_drug"),
        brand_name: field_or_empty(product, "brand_name"),
        active_ingredients: product
            .get("active_ingredients")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
        reference_standard: field_or_empty(product, "reference_standard"),
        dosage_form: field_or_empty(product, "dosage_form"),
        route: field_or_empty(product, "route"),
        marketing_status: field_or_empty(product, "marketing_status"),
    }
}

fn field_or_empty(obj: &Value, key: &str) -> Value {
    obj.get(key)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}
