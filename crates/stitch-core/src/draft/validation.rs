//! Per-step completeness rules.
//!
//! Validation never errors: it reports a list of field problems, and an empty
//! list means the step may be left.

use std::fmt;

use jiff::{civil::Date, ToSpan};
use serde::Serialize;

use super::resolve::as_text;
use crate::models::{Draft, SampleSize, StepKey};

/// Smallest order quantity the factories accept.
pub const MIN_TOTAL_QUANTITY: u32 = 100;

/// Minimum lead time between today and the due date.
pub const MIN_LEAD_DAYS: i64 = 14;

/// One failing field of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProblem {
    pub step: StepKey,
    pub field: &'static str,
    pub reason: String,
}

impl FieldProblem {
    fn new(step: StepKey, field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            step,
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.step, self.field, self.reason)
    }
}

/// Earliest due date accepted when the draft is edited on `today`.
pub fn earliest_due_date(today: Date) -> Option<Date> {
    today.checked_add(MIN_LEAD_DAYS.days()).ok()
}

fn require_text(problems: &mut Vec<FieldProblem>, step: StepKey, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        problems.push(FieldProblem::new(step, field, "required"));
    }
}

fn check_quantity(problems: &mut Vec<FieldProblem>, field: &'static str, quantity: Option<u32>) {
    match quantity {
        None => problems.push(FieldProblem::new(StepKey::Schedule, field, "required")),
        Some(q) if q < MIN_TOTAL_QUANTITY => problems.push(FieldProblem::new(
            StepKey::Schedule,
            field,
            format!("must be at least {MIN_TOTAL_QUANTITY}"),
        )),
        Some(_) => {}
    }
}

fn check_due_date(problems: &mut Vec<FieldProblem>, field: &'static str, due: Option<Date>, today: Date) {
    match (due, earliest_due_date(today)) {
        (None, _) => problems.push(FieldProblem::new(StepKey::Schedule, field, "required")),
        (Some(due), Some(earliest)) if due < earliest => problems.push(FieldProblem::new(
            StepKey::Schedule,
            field,
            format!("must be on or after {earliest}"),
        )),
        (Some(_), None) => {
            problems.push(FieldProblem::new(StepKey::Schedule, field, "date out of range"));
        }
        (Some(_), Some(_)) => {}
    }
}

/// Checks explicit top-level values against the schedule rules.
///
/// Explicit values win over step data when the payload is built, so the
/// value actually sent must satisfy the same rules as the step form.
pub fn override_problems(draft: &Draft, today: Date) -> Vec<FieldProblem> {
    let mut problems = Vec::new();
    let explicit = |key: &str| draft.extra.get(key).and_then(as_text);

    if let Some(size) = explicit("size") {
        if size.parse::<SampleSize>().is_err() {
            problems.push(FieldProblem::new(
                StepKey::Schedule,
                "size",
                format!("unknown sample size '{size}'"),
            ));
        }
    }
    if let Some(quantity) = explicit("quantity") {
        match quantity.parse::<u32>() {
            Ok(q) => check_quantity(&mut problems, "quantity", Some(q)),
            Err(_) => problems.push(FieldProblem::new(
                StepKey::Schedule,
                "quantity",
                "must be a whole number",
            )),
        }
    }
    if let Some(due) = explicit("due_date") {
        match due.parse::<Date>() {
            Ok(date) => check_due_date(&mut problems, "due_date", Some(date), today),
            Err(_) => problems.push(FieldProblem::new(
                StepKey::Schedule,
                "due_date",
                "must be a date (YYYY-MM-DD)",
            )),
        }
    }

    problems
}

/// Lists everything that keeps `step` from being complete.
pub fn step_problems(step: StepKey, draft: &Draft, today: Date) -> Vec<FieldProblem> {
    let mut problems = Vec::new();

    match step {
        StepKey::Product => {
            let product = draft.product.clone().unwrap_or_default();
            require_text(&mut problems, step, "name", &product.name);
            require_text(&mut problems, step, "season", &product.season);
            require_text(
                &mut problems,
                step,
                "target_customer_code",
                &product.target_customer_code,
            );
            require_text(&mut problems, step, "concept", &product.concept);
        }
        StepKey::Design => {
            let file_count = draft.design.as_ref().map_or(0, |d| d.file_count);
            if file_count == 0 {
                problems.push(FieldProblem::new(step, "file_count", "upload at least one design file"));
            }
        }
        StepKey::Materials => {
            let materials = draft.materials.clone().unwrap_or_default();
            require_text(&mut problems, step, "fabric_code", &materials.fabric_code);
            require_text(&mut problems, step, "accessory_code", &materials.accessory_code);
        }
        StepKey::Schedule => {
            let schedule = draft.schedule.clone().unwrap_or_default();
            if schedule.sample_size.is_none() {
                problems.push(FieldProblem::new(step, "sample_size", "required"));
            }
            check_quantity(&mut problems, "total_quantity", schedule.total_quantity);
            check_due_date(&mut problems, "due_date", schedule.due_date, today);
        }
        StepKey::Notes => {}
        StepKey::Review => {
            for earlier in StepKey::ALL.iter().filter(|s| **s != StepKey::Review) {
                problems.extend(step_problems(*earlier, draft, today));
            }
            problems.extend(override_problems(draft, today));
        }
    }

    problems
}

/// Pure completeness predicate for one step.
pub fn is_step_valid(step: StepKey, draft: &Draft, today: Date) -> bool {
    step_problems(step, draft, today).is_empty()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use serde_json::json;

    use crate::models::{DesignStep, MaterialsStep, ProductStep, ScheduleStep};

    fn today() -> Date {
        date(2025, 3, 1)
    }

    fn schedule(quantity: u32, due: Date) -> Draft {
        Draft {
            schedule: Some(ScheduleStep {
                sample_size: Some(SampleSize::M),
                total_quantity: Some(quantity),
                due_date: Some(due),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_quantity_boundary() {
        let due = date(2025, 4, 1);
        assert!(!is_step_valid(StepKey::Schedule, &schedule(99, due), today()));
        assert!(is_step_valid(StepKey::Schedule, &schedule(100, due), today()));
    }

    #[test]
    fn test_due_date_boundary() {
        assert!(!is_step_valid(StepKey::Schedule, &schedule(300, date(2025, 3, 14)), today()));
        assert!(is_step_valid(StepKey::Schedule, &schedule(300, date(2025, 3, 15)), today()));
    }

    #[test]
    fn test_missing_schedule_lists_every_field() {
        let problems = step_problems(StepKey::Schedule, &Draft::default(), today());
        let fields: Vec<_> = problems.iter().map(|p| p.field).collect();
        assert_eq!(fields, vec!["sample_size", "total_quantity", "due_date"]);
    }

    #[test]
    fn test_product_requires_non_blank_fields() {
        let draft = Draft {
            product: Some(ProductStep {
                name: "Tee".to_string(),
                season: "  ".to_string(),
                target_customer_code: "W20".to_string(),
                concept: String::new(),
            }),
            ..Default::default()
        };
        let problems = step_problems(StepKey::Product, &draft, today());
        let fields: Vec<_> = problems.iter().map(|p| p.field).collect();
        assert_eq!(fields, vec!["season", "concept"]);
    }

    #[test]
    fn test_design_needs_a_file() {
        let mut draft = Draft::default();
        assert!(!is_step_valid(StepKey::Design, &draft, today()));
        draft.design = Some(DesignStep {
            file_count: 1,
            point_description: String::new(),
        });
        assert!(is_step_valid(StepKey::Design, &draft, today()));
    }

    #[test]
    fn test_notes_are_optional() {
        assert!(is_step_valid(StepKey::Notes, &Draft::default(), today()));
    }

    #[test]
    fn test_review_aggregates_all_steps() {
        let mut draft = schedule(300, date(2025, 5, 1));
        draft.materials = Some(MaterialsStep {
            fabric_code: "CTN-JERSEY-30S".to_string(),
            accessory_code: String::new(),
        });
        let problems = step_problems(StepKey::Review, &draft, today());
        assert!(problems.iter().any(|p| p.step == StepKey::Product));
        assert!(problems.iter().any(|p| p.step == StepKey::Design));
        assert!(problems
            .iter()
            .any(|p| p.step == StepKey::Materials && p.field == "accessory_code"));
        assert!(!problems.iter().any(|p| p.step == StepKey::Schedule));
    }

    #[test]
    fn test_explicit_schedule_values_follow_step_rules() {
        let mut draft = schedule(300, date(2025, 5, 1));
        draft.extra.insert("quantity".to_string(), json!(5));
        draft.extra.insert("due_date".to_string(), json!("2020-01-01"));
        draft.extra.insert("size".to_string(), json!("XXXL"));

        let problems = override_problems(&draft, today());
        let fields: Vec<_> = problems.iter().map(|p| p.field).collect();
        assert_eq!(fields, vec!["size", "quantity", "due_date"]);
        assert!(step_problems(StepKey::Review, &draft, today())
            .iter()
            .any(|p| p.field == "quantity"));
        assert!(is_step_valid(StepKey::Schedule, &draft, today()));
    }

    #[test]
    fn test_valid_explicit_values_pass() {
        let mut draft = schedule(300, date(2025, 5, 1));
        draft.extra.insert("quantity".to_string(), json!("250"));
        draft.extra.insert("due_date".to_string(), json!("2025-03-15"));
        draft.extra.insert("size".to_string(), json!("free"));
        assert!(override_problems(&draft, today()).is_empty());

        draft.extra.insert("quantity".to_string(), json!("lots"));
        assert_eq!(override_problems(&draft, today())[0].reason, "must be a whole number");
    }

    #[test]
    fn test_problem_display() {
        let problem = FieldProblem::new(StepKey::Schedule, "due_date", "required");
        assert_eq!(problem.to_string(), "schedule.due_date: required");
    }
}
