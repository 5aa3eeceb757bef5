//! The multi-step manufacturing draft.
//!
//! A draft is filled one screen at a time. Each screen owns exactly one
//! step subtree ([`StepData`]); the aggregator merges steps into the stored
//! draft without touching the others.

use std::{fmt, str::FromStr};

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SampleSize;

/// Fabric codes offered by the suggestion panel of the materials screen.
pub const SUGGESTED_FABRICS: &[&str] = &[
    "CTN-JERSEY-30S",
    "CTN-TERRY-20S",
    "CTN-FLEECE-10S",
    "PLY-TWILL-150D",
    "LNN-PLAIN-14S",
];

/// Accessory codes offered by the suggestion panel of the materials screen.
pub const SUGGESTED_ACCESSORIES: &[&str] = &[
    "RIB-1X1-CTN",
    "ZIP-YKK-5VS",
    "BTN-HORN-15MM",
    "LBL-WOVEN-STD",
    "DRW-FLAT-10MM",
];

/// The six sequential screens of the manufacturing wizard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum StepKey {
    Product,
    Design,
    Materials,
    Schedule,
    Notes,
    /// Final review screen; owns no data of its own
    Review,
}

impl StepKey {
    /// Every step in wizard order.
    pub const ALL: [StepKey; 6] = [
        StepKey::Product,
        StepKey::Design,
        StepKey::Materials,
        StepKey::Schedule,
        StepKey::Notes,
        StepKey::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::Product => "product",
            StepKey::Design => "design",
            StepKey::Materials => "materials",
            StepKey::Schedule => "schedule",
            StepKey::Notes => "notes",
            StepKey::Review => "review",
        }
    }

    /// The screen that follows this one, if any.
    pub fn next(&self) -> Option<StepKey> {
        let pos = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(pos + 1).copied()
    }

    /// 1-based screen number.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }
}

impl FromStr for StepKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" | "1" => Ok(StepKey::Product),
            "design" | "2" => Ok(StepKey::Design),
            "materials" | "material" | "3" => Ok(StepKey::Materials),
            "schedule" | "4" => Ok(StepKey::Schedule),
            "notes" | "5" => Ok(StepKey::Notes),
            "review" | "6" => Ok(StepKey::Review),
            _ => Err(format!("Invalid step: {s}")),
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Step 1: what is being made and for whom.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProductStep {
    pub name: String,
    pub season: String,
    pub target_customer_code: String,
    pub concept: String,
}

/// Step 2: design files. Only their count is tracked here; the files
/// themselves stay with the caller until submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DesignStep {
    pub file_count: u32,
    pub point_description: String,
}

/// Step 3: fabric and accessory selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialsStep {
    pub fabric_code: String,
    pub accessory_code: String,
}

/// Step 4: sample size, quantity and due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleStep {
    pub sample_size: Option<SampleSize>,
    pub total_quantity: Option<u32>,
    pub due_date: Option<Date>,
}

/// Step 5: optional free text for the factory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NotesStep {
    pub text: String,
}

/// One screen's worth of data, tagged by the step it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum StepData {
    Product(ProductStep),
    Design(DesignStep),
    Materials(MaterialsStep),
    Schedule(ScheduleStep),
    Notes(NotesStep),
}

impl StepData {
    /// The step this data belongs to.
    pub fn key(&self) -> StepKey {
        match self {
            StepData::Product(_) => StepKey::Product,
            StepData::Design(_) => StepKey::Design,
            StepData::Materials(_) => StepKey::Materials,
            StepData::Schedule(_) => StepKey::Schedule,
            StepData::Notes(_) => StepKey::Notes,
        }
    }

    /// Decodes untyped step data against the schema of `key`.
    ///
    /// Unknown fields and wrong value types are rejected, so a malformed
    /// partial save cannot leak into later steps.
    pub fn from_json(key: StepKey, value: Value) -> crate::Result<Self> {
        let decoded = match key {
            StepKey::Product => serde_json::from_value(value).map(StepData::Product),
            StepKey::Design => serde_json::from_value(value).map(StepData::Design),
            StepKey::Materials => serde_json::from_value(value).map(StepData::Materials),
            StepKey::Schedule => serde_json::from_value(value).map(StepData::Schedule),
            StepKey::Notes => serde_json::from_value(value).map(StepData::Notes),
            StepKey::Review => {
                return Err(crate::MarketError::invalid_input("step")
                    .with_reason("the review step does not store any data"))
            }
        };
        decoded.map_err(|e| crate::MarketError::invalid_input(key.as_str()).with_reason(e.to_string()))
    }
}

/// Identity of a draft: a placeholder until the backend assigns a product.
///
/// Product ids only exist once an order is created, so saving the product
/// step does not change the key. It becomes `Product` when a submission
/// succeeds and the backend returns the new product's id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DraftKey {
    #[default]
    Placeholder,
    Product(u64),
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftKey::Placeholder => write!(f, "new draft"),
            DraftKey::Product(id) => write!(f, "product #{id}"),
        }
    }
}

/// Identifiers assigned by the backend when the draft is submitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    #[serde(alias = "productId")]
    pub product_id: u64,
    #[serde(alias = "orderId")]
    pub order_id: u64,
    #[serde(alias = "requestOrderId")]
    pub request_order_id: u64,
}

/// The client-accumulated, not-yet-submitted order.
///
/// `extra` keeps top-level keys outside the step schema: explicit overrides
/// (`target`, `size`, ...) and keys written by older versions of the
/// wizard. The submission resolver reads both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Draft {
    #[serde(default)]
    pub key: DraftKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<MaterialsStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<NotesStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<Submission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Draft {
    /// Merges one step into the draft, replacing only that step's subtree.
    pub fn apply(&mut self, data: StepData) {
        match data {
            StepData::Product(step) => self.product = Some(step),
            StepData::Design(step) => self.design = Some(step),
            StepData::Materials(step) => self.materials = Some(step),
            StepData::Schedule(step) => self.schedule = Some(step),
            StepData::Notes(step) => self.notes = Some(step),
        }
    }

    /// Whether any step has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.product.is_none()
            && self.design.is_none()
            && self.materials.is_none()
            && self.schedule.is_none()
            && self.notes.is_none()
            && self.extra.is_empty()
    }

    /// Steps that currently hold data, in wizard order.
    pub fn saved_steps(&self) -> Vec<StepKey> {
        let mut steps = Vec::new();
        if self.product.is_some() {
            steps.push(StepKey::Product);
        }
        if self.design.is_some() {
            steps.push(StepKey::Design);
        }
        if self.materials.is_some() {
            steps.push(StepKey::Materials);
        }
        if self.schedule.is_some() {
            steps.push(StepKey::Schedule);
        }
        if self.notes.is_some() {
            steps.push(StepKey::Notes);
        }
        steps
    }
}
