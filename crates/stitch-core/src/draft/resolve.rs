//! Declared fallback chains for submission fields.
//!
//! Every submission field lists its sources in priority order as JSON
//! pointers into the serialized draft: the explicit top-level value first,
//! then the step's own field, then keys written by older wizard versions.
//! One resolver walks every chain, so the precedence rules live in a single
//! table.

use serde_json::Value;

/// Resolution rule for one multipart field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub sources: &'static [&'static str],
    pub required: bool,
}

/// Fields of the order-creation payload, in submission order.
pub const SUBMISSION_FIELDS: &[FieldRule] = &[
    FieldRule {
        field: "name",
        sources: &["/name", "/product/name", "/productName"],
        required: true,
    },
    FieldRule {
        field: "season",
        sources: &["/season", "/product/season"],
        required: true,
    },
    FieldRule {
        field: "target",
        sources: &["/target", "/product/target_customer_code", "/targetCustomer"],
        required: true,
    },
    FieldRule {
        field: "concept",
        sources: &["/concept", "/product/concept"],
        required: true,
    },
    FieldRule {
        field: "detail",
        sources: &["/detail", "/design/point_description", "/pointDescription"],
        required: false,
    },
    FieldRule {
        field: "size",
        sources: &["/size", "/schedule/sample_size", "/sampleSize"],
        required: true,
    },
    FieldRule {
        field: "quantity",
        sources: &["/quantity", "/schedule/total_quantity", "/totalQuantity"],
        required: true,
    },
    FieldRule {
        field: "fabric_code",
        sources: &["/fabric_code", "/materials/fabric_code", "/fabricCode"],
        required: true,
    },
    FieldRule {
        field: "material_code",
        sources: &["/material_code", "/materials/accessory_code", "/accessoryCode"],
        required: true,
    },
    FieldRule {
        field: "due_date",
        sources: &["/due_date", "/schedule/due_date", "/dueDate"],
        required: true,
    },
    FieldRule {
        field: "memo",
        sources: &["/memo", "/notes/text", "/additionalNotes"],
        required: false,
    },
];

/// Looks up the rule for a submission field.
pub fn rule_for(field: &str) -> Option<&'static FieldRule> {
    SUBMISSION_FIELDS.iter().find(|rule| rule.field == field)
}

/// Renders a JSON scalar as form text. Blank strings, nulls and containers
/// count as "no value" so the chain moves on.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Returns the first usable value along `sources`.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use stitch_core::draft::resolve::resolve;
///
/// let doc = json!({"target": "", "product": {"target_customer_code": "W20"}});
/// let chain = ["/target", "/product/target_customer_code", "/targetCustomer"];
/// assert_eq!(resolve(&doc, &chain), Some("W20".to_string()));
/// ```
pub fn resolve(document: &Value, sources: &[&str]) -> Option<String> {
    sources
        .iter()
        .filter_map(|pointer| document.pointer(pointer))
        .find_map(as_text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const TARGET: &[&str] = &["/target", "/product/target_customer_code", "/targetCustomer"];

    #[test]
    fn test_top_level_value_wins() {
        let doc = json!({
            "target": "explicit",
            "product": {"target_customer_code": "nested"},
            "targetCustomer": "legacy"
        });
        assert_eq!(resolve(&doc, TARGET).as_deref(), Some("explicit"));
    }

    #[test]
    fn test_nested_value_beats_legacy() {
        let doc = json!({
            "product": {"target_customer_code": "nested"},
            "targetCustomer": "legacy"
        });
        assert_eq!(resolve(&doc, TARGET).as_deref(), Some("nested"));
    }

    #[test]
    fn test_legacy_value_is_last_resort() {
        let doc = json!({"product": {"target_customer_code": "   "}, "targetCustomer": "legacy"});
        assert_eq!(resolve(&doc, TARGET).as_deref(), Some("legacy"));
    }

    #[test]
    fn test_numbers_render_as_text_and_nulls_are_skipped() {
        let doc = json!({"quantity": null, "schedule": {"total_quantity": 300}});
        let rule = rule_for("quantity").unwrap();
        assert_eq!(resolve(&doc, rule.sources).as_deref(), Some("300"));
    }

    #[test]
    fn test_every_field_is_declared_once() {
        let mut names: Vec<_> = SUBMISSION_FIELDS.iter().map(|r| r.field).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 11);
    }
}
