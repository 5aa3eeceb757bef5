//! Flattening a finished draft into the order-creation payload.

use log::warn;

use super::resolve::{resolve, SUBMISSION_FIELDS};
use crate::{
    error::{MarketError, Result},
    models::{DesignFile, Draft, SubmissionPayload},
};

/// Number of design files the draft records when none were supplied.
///
/// The design step only tracks a count, so a caller can pass a finished
/// draft without the files themselves.
pub fn missing_design_files(draft: &Draft, design_files: &[DesignFile]) -> Option<u32> {
    let recorded = draft.design.as_ref().map_or(0, |d| d.file_count);
    (design_files.is_empty() && recorded > 0).then_some(recorded)
}

/// Builds the multipart payload for the order-creation endpoint.
///
/// Every field is resolved through its declared fallback chain. Optional
/// fields resolve to an empty string. Only the first design file is
/// attached; the backend accepts a single image, and the number of files
/// left out is reported on the payload and logged.
///
/// # Errors
///
/// * `MarketError::InvalidInput` - When a required field resolves to nothing
/// * `MarketError::Serialization` - When the draft cannot be serialized
pub fn build_submission_payload(draft: &Draft, design_files: &[DesignFile]) -> Result<SubmissionPayload> {
    let document = serde_json::to_value(draft)?;

    let mut fields = Vec::with_capacity(SUBMISSION_FIELDS.len());
    for rule in SUBMISSION_FIELDS {
        match resolve(&document, rule.sources) {
            Some(value) => fields.push((rule.field.to_string(), value)),
            None if rule.required => {
                return Err(MarketError::invalid_input(rule.field)
                    .with_reason("required for submission but missing from the draft"));
            }
            None => fields.push((rule.field.to_string(), String::new())),
        }
    }

    let image = design_files.first().cloned();
    let dropped_files = design_files.len().saturating_sub(1);
    if dropped_files > 0 {
        warn!(
            "Only the first design file is submitted; {dropped_files} additional file(s) were left out"
        );
    }

    Ok(SubmissionPayload {
        fields,
        image,
        dropped_files,
    })
}
