//! Tests for the draft aggregator.

use jiff::civil::date;
use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::{
    api::fake::FakeApi,
    error::FailureKind,
    models::{
        DesignStep, MaterialsStep, NotesStep, ProductStep, SampleSize, ScheduleStep,
    },
    store::MemoryDraftStore,
};

fn aggregator() -> DraftAggregator {
    DraftAggregatorBuilder::new()
        .in_memory()
        .with_today(date(2025, 3, 1))
        .build()
}

fn product() -> StepData {
    StepData::Product(ProductStep {
        name: "Boxy tee".to_string(),
        season: "2025 SS".to_string(),
        target_customer_code: "W20".to_string(),
        concept: "Heavyweight basics".to_string(),
    })
}

fn fill_all_steps(aggregator: &DraftAggregator) -> Draft {
    aggregator.save_step(product()).expect("save product");
    aggregator
        .save_step(StepData::Design(DesignStep {
            file_count: 2,
            point_description: "Dropped shoulder".to_string(),
        }))
        .expect("save design");
    aggregator
        .save_step(StepData::Materials(MaterialsStep {
            fabric_code: "CTN-JERSEY-30S".to_string(),
            accessory_code: "LABEL-WOVEN".to_string(),
        }))
        .expect("save materials");
    aggregator
        .save_step(StepData::Schedule(ScheduleStep {
            sample_size: Some(SampleSize::M),
            total_quantity: Some(300),
            due_date: Some(date(2025, 4, 1)),
        }))
        .expect("save schedule");
    aggregator
        .save_step(StepData::Notes(NotesStep {
            text: "Please send swatches".to_string(),
        }))
        .expect("save notes")
}

fn design_file(name: &str) -> DesignFile {
    DesignFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

fn submission() -> Submission {
    Submission {
        product_id: 41,
        order_id: 42,
        request_order_id: 43,
    }
}

#[test]
fn test_empty_store_loads_default_draft() {
    let draft = aggregator().load_draft();
    assert!(draft.is_empty());
    assert_eq!(draft.key, DraftKey::Placeholder);
}

#[test]
fn test_corrupt_draft_loads_as_default() {
    let store = MemoryDraftStore::new();
    store.set(CURRENT_DRAFT_KEY, "{not json").unwrap();
    let aggregator = DraftAggregator::new(store);
    assert!(aggregator.load_draft().is_empty());
}

#[test]
fn test_saving_a_step_keeps_other_steps() {
    let aggregator = aggregator();
    aggregator.save_step(product()).unwrap();
    aggregator
        .save_step(StepData::Design(DesignStep {
            file_count: 1,
            point_description: "Raglan".to_string(),
        }))
        .unwrap();

    let draft = aggregator
        .save_step(StepData::Product(ProductStep {
            name: "Renamed tee".to_string(),
            ..Default::default()
        }))
        .unwrap();

    assert_eq!(draft.product.as_ref().unwrap().name, "Renamed tee");
    assert_eq!(draft.product.as_ref().unwrap().season, "");
    assert_eq!(draft.design.as_ref().unwrap().point_description, "Raglan");
    assert_eq!(aggregator.load_draft(), draft);
    assert!(draft.updated_at.is_some());
}

#[test]
fn test_save_step_json_rejects_unknown_fields() {
    let aggregator = aggregator();
    aggregator.save_step(product()).unwrap();
    let before = aggregator.load_draft();

    let result = aggregator.save_step_json(StepKey::Product, json!({"name": "x", "colour": "red"}));
    assert!(matches!(result, Err(MarketError::InvalidInput { .. })));
    assert_eq!(aggregator.load_draft(), before);
}

#[test]
fn test_save_step_json_accepts_partial_data() {
    let aggregator = aggregator();
    let draft = aggregator
        .save_step_json(StepKey::Schedule, json!({"total_quantity": 120}))
        .unwrap();
    let schedule = draft.schedule.unwrap();
    assert_eq!(schedule.total_quantity, Some(120));
    assert_eq!(schedule.sample_size, None);
}

#[test]
fn test_save_override_only_accepts_submission_fields() {
    let aggregator = aggregator();
    let draft = aggregator.save_override("target", json!("M30")).unwrap();
    assert_eq!(draft.extra.get("target"), Some(&json!("M30")));

    let draft = aggregator.save_override("target", serde_json::Value::Null).unwrap();
    assert!(!draft.extra.contains_key("target"));

    let result = aggregator.save_override("favourite_colour", json!("red"));
    assert!(matches!(result, Err(MarketError::InvalidInput { .. })));
}

#[test]
fn test_advance_walks_the_wizard() {
    let aggregator = aggregator();
    match aggregator.advance(StepKey::Product) {
        Navigation::Invalid { step, problems } => {
            assert_eq!(step, StepKey::Product);
            assert_eq!(problems.len(), 4);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }

    aggregator.save_step(product()).unwrap();
    assert_eq!(aggregator.advance(StepKey::Product), Navigation::Next(StepKey::Design));
    assert_eq!(aggregator.advance(StepKey::Notes), Navigation::Next(StepKey::Review));
    assert!(matches!(aggregator.advance(StepKey::Review), Navigation::Invalid { .. }));

    fill_all_steps(&aggregator);
    assert_eq!(aggregator.advance(StepKey::Review), Navigation::Complete);
}

#[test]
fn test_due_date_validation_uses_pinned_today() {
    let aggregator = aggregator();
    let draft = aggregator
        .save_step(StepData::Schedule(ScheduleStep {
            sample_size: Some(SampleSize::L),
            total_quantity: Some(100),
            due_date: Some(date(2025, 3, 14)),
        }))
        .unwrap();
    assert!(!aggregator.is_step_valid(StepKey::Schedule, &draft));

    let later = aggregator.with_today(date(2025, 2, 28));
    assert!(later.is_step_valid(StepKey::Schedule, &draft));
}

#[test]
fn test_payload_resolves_fields_from_steps() {
    let aggregator = aggregator();
    let draft = fill_all_steps(&aggregator);
    let payload = aggregator
        .build_submission_payload(&draft, &[design_file("front.png")])
        .unwrap();

    assert_eq!(payload.field("name"), Some("Boxy tee"));
    assert_eq!(payload.field("target"), Some("W20"));
    assert_eq!(payload.field("detail"), Some("Dropped shoulder"));
    assert_eq!(payload.field("size"), Some("M"));
    assert_eq!(payload.field("quantity"), Some("300"));
    assert_eq!(payload.field("fabric_code"), Some("CTN-JERSEY-30S"));
    assert_eq!(payload.field("material_code"), Some("LABEL-WOVEN"));
    assert_eq!(payload.field("due_date"), Some("2025-04-01"));
    assert_eq!(payload.field("memo"), Some("Please send swatches"));
    assert_eq!(payload.fields[0].0, "name");
}

#[test]
fn test_explicit_value_beats_step_value() {
    let aggregator = aggregator();
    fill_all_steps(&aggregator);
    let draft = aggregator.save_override("target", json!("M30")).unwrap();

    let payload = aggregator.build_submission_payload(&draft, &[]).unwrap();
    assert_eq!(payload.field("target"), Some("M30"));
}

#[test]
fn test_legacy_keys_fill_missing_step_values() {
    let aggregator = aggregator();
    let mut draft = fill_all_steps(&aggregator);
    draft.product.as_mut().unwrap().target_customer_code = String::new();
    draft.extra.insert("targetCustomer".to_string(), json!("K10"));

    let payload = aggregator.build_submission_payload(&draft, &[]).unwrap();
    assert_eq!(payload.field("target"), Some("K10"));
}

#[test]
fn test_missing_required_field_fails_payload() {
    let aggregator = aggregator();
    let mut draft = fill_all_steps(&aggregator);
    draft.materials = None;

    match aggregator.build_submission_payload(&draft, &[]) {
        Err(MarketError::InvalidInput { field, .. }) => assert_eq!(field, "fabric_code"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_optional_fields_default_to_empty() {
    let aggregator = aggregator();
    let mut draft = fill_all_steps(&aggregator);
    draft.notes = None;

    let payload = aggregator.build_submission_payload(&draft, &[]).unwrap();
    assert_eq!(payload.field("memo"), Some(""));
    assert!(payload.image.is_none());
}

#[test]
fn test_only_first_design_file_is_attached() {
    let aggregator = aggregator();
    let draft = fill_all_steps(&aggregator);
    let files = [
        design_file("front.png"),
        design_file("back.png"),
        design_file("detail.png"),
    ];

    let payload = aggregator.build_submission_payload(&draft, &files).unwrap();
    assert_eq!(payload.image.as_ref().unwrap().file_name, "front.png");
    assert_eq!(payload.dropped_files, 2);
}

#[tokio::test]
async fn test_successful_submit_records_ids_and_keeps_draft() {
    let aggregator = aggregator();
    fill_all_steps(&aggregator);
    assert_eq!(aggregator.load_draft().key, DraftKey::Placeholder);
    let api = FakeApi::accepting(submission());

    let result = aggregator
        .submit_draft(&api, &[design_file("front.png")])
        .await
        .expect("submission should succeed");
    assert_eq!(result, submission());
    assert_eq!(api.payloads().len(), 1);

    let draft = aggregator.load_draft();
    assert_eq!(draft.key, DraftKey::Product(41));
    assert_eq!(draft.submission, Some(submission()));
    assert!(draft.product.is_some());
}

#[tokio::test]
async fn test_failed_submit_leaves_draft_untouched() {
    let aggregator = aggregator();
    let before = fill_all_steps(&aggregator);
    let api = FakeApi::failing(FailureKind::Timeout);
    let payload = aggregator.build_submission_payload(&before, &[]).unwrap();

    let error = aggregator.submit(&api, &payload).await.unwrap_err();
    assert!(matches!(
        error,
        MarketError::SubmissionFailed {
            kind: FailureKind::Timeout,
            ..
        }
    ));
    assert!(error.is_retryable());
    assert_eq!(aggregator.load_draft(), before);
}

#[tokio::test]
async fn test_rejected_submit_is_not_retryable() {
    let aggregator = aggregator();
    let before = fill_all_steps(&aggregator);
    let api = FakeApi::failing(FailureKind::Rejected { status: 400 });

    let error = aggregator.submit_draft(&api, &[]).await.unwrap_err();
    assert!(!error.is_retryable());
    assert_eq!(aggregator.load_draft(), before);
}

#[tokio::test]
async fn test_incomplete_draft_never_reaches_backend() {
    let aggregator = aggregator();
    aggregator.save_step(product()).unwrap();
    let api = FakeApi::accepting(submission());

    let result = aggregator.submit_draft(&api, &[]).await;
    assert!(matches!(result, Err(MarketError::InvalidInput { .. })));
    assert!(api.payloads().is_empty());
}

#[tokio::test]
async fn test_explicit_values_breaking_schedule_rules_are_not_sent() {
    let aggregator = aggregator();
    fill_all_steps(&aggregator);
    aggregator.save_override("quantity", json!(5)).unwrap();
    aggregator.save_override("due_date", json!("2020-01-01")).unwrap();
    let api = FakeApi::accepting(submission());

    match aggregator.submit_draft(&api, &[design_file("front.png")]).await {
        Err(MarketError::InvalidInput { field, reason }) => {
            assert_eq!(field, "quantity");
            assert!(reason.contains("at least 100"));
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    assert!(api.payloads().is_empty());
    assert!(matches!(
        aggregator.advance(StepKey::Review),
        Navigation::Invalid { .. }
    ));

    aggregator.save_override("quantity", json!("150")).unwrap();
    aggregator.save_override("due_date", json!("2025-03-20")).unwrap();
    aggregator
        .submit_draft(&api, &[design_file("front.png")])
        .await
        .expect("valid explicit values are submitted");
    let sent = &api.payloads()[0];
    assert_eq!(sent.field("quantity"), Some("150"));
    assert_eq!(sent.field("due_date"), Some("2025-03-20"));
}

#[test]
fn test_recorded_design_files_without_attachments_are_detected() {
    let aggregator = aggregator();
    let draft = fill_all_steps(&aggregator);
    assert_eq!(payload::missing_design_files(&draft, &[]), Some(2));
    assert_eq!(payload::missing_design_files(&draft, &[design_file("front.png")]), None);
    assert_eq!(payload::missing_design_files(&Draft::default(), &[]), None);
}

#[test]
fn test_reset_clears_the_draft() {
    let aggregator = aggregator();
    fill_all_steps(&aggregator);
    aggregator.reset().unwrap();
    assert!(aggregator.load_draft().is_empty());
}

#[test]
fn test_sqlite_draft_survives_new_aggregator() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("drafts.db");

    let first = DraftAggregatorBuilder::new()
        .with_database_path(Some(&db_path))
        .build();
    first.save_step(product()).unwrap();

    let second = DraftAggregatorBuilder::new()
        .with_database_path(Some(&db_path))
        .build();
    assert_eq!(second.load_draft().product, first.load_draft().product);

    let other_session = DraftAggregatorBuilder::new()
        .with_database_path(Some(&db_path))
        .with_session("other")
        .build();
    assert!(other_session.load_draft().is_empty());
}

#[test]
fn test_unusable_database_path_degrades_to_memory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("not-a-directory");
    std::fs::write(&blocker, b"file").unwrap();

    let aggregator = DraftAggregatorBuilder::new()
        .with_database_path(Some(blocker.join("drafts.db")))
        .build();
    aggregator.save_step(product()).unwrap();
    assert!(aggregator.load_draft().product.is_some());
}
