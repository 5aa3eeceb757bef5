//! Tests for worksheet mapping and rendering.

use serde_json::json;

use super::*;
use crate::api::fake::FakeApi;

const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64,
    0x60, 0xF8, 0x5F, 0x0F, 0x00, 0x02, 0x87, 0x01, 0x80, 0xEB, 0x47, 0xBA, 0x92, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn data() -> WorksheetData {
    WorksheetData {
        product_name: "Boxy tee".to_string(),
        season: "2025 SS".to_string(),
        target: "W20".to_string(),
        due_date: "2025-04-01".to_string(),
        quantity: Some(300),
        fabric: "CTN-JERSEY-30S".to_string(),
        material: "LABEL-WOVEN".to_string(),
        concept: "Heavyweight basics".to_string(),
        detail: "Dropped shoulder".to_string(),
        memo: String::new(),
        garment_type: "hoodie".to_string(),
        size: "M".to_string(),
        image_url: None,
    }
}

fn text(value: &str) -> Option<CellValue> {
    Some(CellValue::Text(value.to_string()))
}

#[test]
fn test_fields_land_in_fixed_cells() {
    let layout = map_worksheet(&data(), &WorksheetTemplate::standard());

    assert_eq!(layout.value_at("B3").cloned(), text("Boxy tee"));
    assert_eq!(layout.value_at("B4").cloned(), text("2025 SS"));
    assert_eq!(layout.value_at("B5").cloned(), text("W20"));
    assert_eq!(layout.value_at("B6").cloned(), text("2025-04-01"));
    assert_eq!(layout.value_at("B7"), Some(&CellValue::Number(300.0)));
    assert_eq!(layout.value_at("B8").cloned(), text("CTN-JERSEY-30S"));
    assert_eq!(layout.value_at("B9").cloned(), text("LABEL-WOVEN"));
    assert_eq!(layout.value_at("B10").cloned(), text("Heavyweight basics"));
    assert_eq!(layout.value_at("B11").cloned(), text("Dropped shoulder"));
    assert_eq!(layout.value_at("B12"), Some(&CellValue::Blank));
    assert!(layout.warnings.is_empty());
}

#[test]
fn test_measurements_fill_ten_consecutive_cells() {
    let template = WorksheetTemplate::standard();
    let layout = map_worksheet(&data(), &template);

    let cells: Vec<String> = template.measurement_cells().map(|c| c.to_string()).collect();
    assert_eq!(cells.first().map(String::as_str), Some("B18"));
    assert_eq!(cells.last().map(String::as_str), Some("K18"));

    let expected = template
        .size_chart
        .lookup(GarmentType::Hoodie, crate::models::SampleSize::M)
        .unwrap();
    for (cell, value) in template.measurement_cells().zip(expected) {
        assert_eq!(layout.cells.get(&cell), Some(&CellValue::Number(value)));
    }
}

#[test]
fn test_unknown_garment_leaves_measurements_blank() {
    let template = WorksheetTemplate::standard();
    let mut data = data();
    data.garment_type = "kimono".to_string();

    let layout = map_worksheet(&data, &template);

    for cell in template.measurement_cells() {
        assert_eq!(layout.cells.get(&cell), Some(&CellValue::Blank), "{cell}");
    }
    assert_eq!(
        layout.warnings,
        vec![LayoutWarning::LookupTableMiss {
            garment: "kimono".to_string(),
            size: "M".to_string(),
        }]
    );
    assert_eq!(layout.value_at("B3").cloned(), text("Boxy tee"));
}

#[test]
fn test_unknown_size_is_a_lookup_miss() {
    let mut data = data();
    data.size = "XXXL".to_string();
    let layout = map_worksheet(&data, &WorksheetTemplate::standard());
    assert_eq!(layout.warnings.len(), 1);
}

#[test]
fn test_template_labels_cover_fields_and_measurements() {
    let template = WorksheetTemplate::standard();
    let label_at = |address: &str| {
        let cell: CellRef = address.parse().unwrap();
        template
            .labels
            .iter()
            .find(|(c, _)| *c == cell)
            .map(|(_, label)| label.as_str())
    };
    assert_eq!(label_at("A3"), Some("Product"));
    assert_eq!(label_at("B17"), Some("Total length"));
    assert_eq!(label_at("K17"), Some("Neck width"));
    assert_eq!(template.cell_for(WorksheetField::Memo), "B12".parse().ok());
}

#[test]
fn test_data_accepts_camel_case_keys() {
    let data: WorksheetData = serde_json::from_value(json!({
        "productName": "Boxy tee",
        "targetCustomer": "W20",
        "fabricCode": "CTN",
        "sampleSize": "L",
        "garmentType": "shirt",
        "quantity": 120
    }))
    .unwrap();
    assert_eq!(data.product_name, "Boxy tee");
    assert_eq!(data.target, "W20");
    assert_eq!(data.fabric, "CTN");
    assert_eq!(data.size, "L");
    assert_eq!(data.quantity, Some(120));

    let from_backend: WorksheetData = serde_json::from_str(
        r#"{"productName": "Tee", "quantity": "300", "dueDate": "2025-05-01"}"#,
    )
    .unwrap();
    assert_eq!(from_backend.quantity, Some(300));
    assert_eq!(from_backend.due_date, "2025-05-01");

    let unusable: WorksheetData = serde_json::from_value(json!({"quantity": "many"})).unwrap();
    assert_eq!(unusable.quantity, None);
}

#[test]
fn test_build_worksheet_produces_xlsx() {
    let bytes = build_worksheet(&data(), &WorksheetTemplate::standard(), None).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_broken_image_is_ignored() {
    let bytes = build_worksheet(
        &data(),
        &WorksheetTemplate::standard(),
        Some(b"definitely not an image".as_slice()),
    )
    .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_export_embeds_fetched_image() {
    let api = FakeApi::new().with_image("media/front.png", PNG_1X1.to_vec());
    let mut data = data();
    data.image_url = Some("media/front.png".to_string());

    let bytes = export_worksheet(&api, &data, &WorksheetTemplate::standard())
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_export_survives_missing_image() {
    let api = FakeApi::new();
    let mut data = data();
    data.image_url = Some("media/gone.png".to_string());

    let bytes = export_worksheet(&api, &data, &WorksheetTemplate::standard())
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}
