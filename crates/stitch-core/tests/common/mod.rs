#![allow(dead_code)]

use std::time::Duration;

use jiff::civil::date;
use serde_json::{json, Value};
use stitch_core::{
    models::{DesignStep, MaterialsStep, NotesStep, ProductStep, ScheduleStep},
    ApiConfig, DraftAggregator, DraftAggregatorBuilder, HttpMarketplaceApi, SampleSize, StepData,
};
use tempfile::TempDir;

/// Helper function to create an aggregator backed by a temporary database
pub fn create_test_aggregator() -> (TempDir, DraftAggregator) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let aggregator = DraftAggregatorBuilder::new()
        .with_database_path(Some(&db_path))
        .with_today(date(2025, 3, 1))
        .build();
    (temp_dir, aggregator)
}

/// Client for a mock server, authenticated with `test-token`
pub fn create_test_client(base_url: &str) -> HttpMarketplaceApi {
    let config = ApiConfig::new(base_url)
        .expect("Failed to build config")
        .with_token(Some("test-token".to_string()))
        .with_timeout(Duration::from_secs(2));
    HttpMarketplaceApi::new(config).expect("Failed to build client")
}

/// Saves a complete, valid draft
pub fn fill_draft(aggregator: &DraftAggregator) {
    let steps = [
        StepData::Product(ProductStep {
            name: "Boxy tee".to_string(),
            season: "2025 SS".to_string(),
            target_customer_code: "W20".to_string(),
            concept: "Heavyweight basics".to_string(),
        }),
        StepData::Design(DesignStep {
            file_count: 1,
            point_description: "Dropped shoulder".to_string(),
        }),
        StepData::Materials(MaterialsStep {
            fabric_code: "CTN-JERSEY-30S".to_string(),
            accessory_code: "LABEL-WOVEN".to_string(),
        }),
        StepData::Schedule(ScheduleStep {
            sample_size: Some(SampleSize::M),
            total_quantity: Some(300),
            due_date: Some(date(2025, 4, 1)),
        }),
        StepData::Notes(NotesStep {
            text: "Please send swatches".to_string(),
        }),
    ];
    for step in steps {
        aggregator.save_step(step).expect("Failed to save step");
    }
}

/// A quote order as the backend serializes it
pub fn quote_json(order_id: u64, request_order_id: u64, created_at: &str) -> Value {
    json!({
        "id": order_id + 1000,
        "orderId": order_id,
        "requestOrderId": request_order_id,
        "quantity": "300",
        "productInfo": {
            "name": format!("Order {order_id}"),
            "dueDate": "2025-05-01",
            "designerName": "Mina"
        },
        "status": "pending",
        "workPrice": null,
        "createdAt": created_at
    })
}
