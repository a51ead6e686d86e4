use crate::domain::model::ProcessedRecord;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use serde_json::Value;

const CSV_HEADER: [&str; 8] = [
    "application_number",
    "sponsor_name",
    "product_number",
    "brand_name",
    "dosage_form",
    "route",
    "marketing_status",
    "active_ingredients",
];

/// Serializes the projected records with 4-space indentation, matching the
/// layout of the processed output file.
pub fn to_pretty_json(records: &[ProcessedRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    Ok(buf)
}

/// Flattens records into one CSV row per product. Records with no products
/// keep a single row with empty product columns so every application stays
/// visible in the flat output.
pub fn render_products_csv(records: &[ProcessedRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in records {
        let application_number = cell(&record.application_number);
        let sponsor_name = cell(&record.sponsor_name);

        if record.products.is_empty() {
            writer.write_record([
                application_number.as_str(),
                sponsor_name.as_str(),
                "",
                "",
                "",
                "",
                "",
                "",
            ])?;
            continue;
        }

        for product in &record.products {
            writer.write_record([
                application_number.as_str(),
                sponsor_name.as_str(),
                cell(&product.product_number).as_str(),
                cell(&product.brand_name).as_str(),
                cell(&product.dosage_form).as_str(),
                cell(&product.route).as_str(),
                cell(&product.marketing_status).as_str(),
                ingredients_cell(&product.active_ingredients).as_str(),
            ])?;
        }
    }

    let data = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("CSV buffer error: {}", e),
    })?;

    String::from_utf8(data).map_err(|e| EtlError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Ingredients are usually `[{"name": ..., "strength": ...}]`; render names
// joined with "; " and fall back to compact JSON for anything else.
fn ingredients_cell(value: &Value) -> String {
    match value.as_array() {
        Some(items) => items
            .iter()
            .map(|item| {
                item.get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| cell(item))
            })
            .collect::<Vec<_>>()
            .join("; "),
        None => cell(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projector::project_document;
    use serde_json::json;

    #[test]
    fn test_pretty_json_uses_four_space_indent() {
        let records = project_document(&json!({
            "results": [{"application_number": "NDA000001", "sponsor_name": "ACME"}]
        }));

        let output = String::from_utf8(to_pretty_json(&records).unwrap()).unwrap();

        assert!(output.contains("    \"application_number\": \"NDA000001\""));
        assert!(!output.contains("  \"application_number\""));
    }

    #[test]
    fn test_pretty_json_empty_records() {
        let output = String::from_utf8(to_pretty_json(&[]).unwrap()).unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_csv_one_row_per_product() {
        let records = project_document(&json!({
            "results": [{
                "application_number": "NDA000001",
                "sponsor_name": "ACME",
                "products": [
                    {"product_number": "001", "brand_name": "ALPHA"},
                    {"product_number": "002", "brand_name": "BETA"}
                ]
            }]
        }));

        let csv_output = render_products_csv(&records).unwrap();
        let lines: Vec<&str> = csv_output.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 products
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].starts_with("NDA000001,ACME,001,ALPHA"));
        assert!(lines[2].starts_with("NDA000001,ACME,002,BETA"));
    }

    #[test]
    fn test_csv_record_without_products_keeps_one_row() {
        let records = project_document(&json!({
            "results": [{"application_number": "NDA000002", "sponsor_name": "NO PRODUCTS INC"}]
        }));

        let csv_output = render_products_csv(&records).unwrap();
        let lines: Vec<&str> = csv_output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "NDA000002,NO PRODUCTS INC,,,,,,");
    }

    #[test]
    fn test_csv_joins_ingredient_names() {
        let records = project_document(&json!({
            "results": [{
                "application_number": "NDA000003",
                "products": [{
                    "product_number": "001",
                    "active_ingredients": [
                        {"name": "IBUPROFEN", "strength": "200MG"},
                        {"name": "CAFFEINE", "strength": "65MG"}
                    ]
                }]
            }]
        }));

        let csv_output = render_products_csv(&records).unwrap();

        assert!(csv_output.contains("IBUPROFEN; CAFFEINE"));
    }
}
