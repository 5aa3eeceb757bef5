//! Mapping order data onto the fixed worksheet cells.

use std::{collections::BTreeMap, fmt};

use log::warn;
use serde::{Deserialize, Serialize};

use super::{
    cells::CellRef,
    sizes::{GarmentType, SizeChart, MEASUREMENTS},
};
use crate::models::{opt_u64, SampleSize};

/// Order data written to a worksheet.
///
/// Accepts both snake_case and camelCase keys so that exported order JSON
/// can be fed in directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorksheetData {
    #[serde(alias = "productName", alias = "name")]
    pub product_name: String,
    pub season: String,
    #[serde(alias = "targetCustomer", alias = "target_customer_code")]
    pub target: String,
    #[serde(alias = "dueDate")]
    pub due_date: String,
    /// Backends send quantities as numbers or numeric strings
    #[serde(alias = "totalQuantity", deserialize_with = "opt_u64")]
    pub quantity: Option<u64>,
    #[serde(alias = "fabricCode", alias = "fabric_code")]
    pub fabric: String,
    #[serde(alias = "materialCode", alias = "material_code")]
    pub material: String,
    pub concept: String,
    pub detail: String,
    pub memo: String,
    #[serde(alias = "garmentType", alias = "category")]
    pub garment_type: String,
    #[serde(alias = "sampleSize")]
    pub size: String,
    #[serde(alias = "imageUrl", alias = "image_path")]
    pub image_url: Option<String>,
}

/// Fields with a fixed cell in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorksheetField {
    ProductName,
    Season,
    Target,
    DueDate,
    Quantity,
    Fabric,
    Material,
    Concept,
    Detail,
    Memo,
    GarmentType,
    Size,
}

impl WorksheetField {
    pub const ALL: [WorksheetField; 12] = [
        WorksheetField::ProductName,
        WorksheetField::Season,
        WorksheetField::Target,
        WorksheetField::DueDate,
        WorksheetField::Quantity,
        WorksheetField::Fabric,
        WorksheetField::Material,
        WorksheetField::Concept,
        WorksheetField::Detail,
        WorksheetField::Memo,
        WorksheetField::GarmentType,
        WorksheetField::Size,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorksheetField::ProductName => "Product",
            WorksheetField::Season => "Season",
            WorksheetField::Target => "Target",
            WorksheetField::DueDate => "Due date",
            WorksheetField::Quantity => "Quantity",
            WorksheetField::Fabric => "Fabric",
            WorksheetField::Material => "Material",
            WorksheetField::Concept => "Concept",
            WorksheetField::Detail => "Detail",
            WorksheetField::Memo => "Memo",
            WorksheetField::GarmentType => "Garment",
            WorksheetField::Size => "Size",
        }
    }

    fn value(&self, data: &WorksheetData) -> CellValue {
        let text = match self {
            WorksheetField::Quantity => {
                return data
                    .quantity
                    .map_or(CellValue::Blank, |q| CellValue::Number(q as f64));
            }
            WorksheetField::ProductName => &data.product_name,
            WorksheetField::Season => &data.season,
            WorksheetField::Target => &data.target,
            WorksheetField::DueDate => &data.due_date,
            WorksheetField::Fabric => &data.fabric,
            WorksheetField::Material => &data.material,
            WorksheetField::Concept => &data.concept,
            WorksheetField::Detail => &data.detail,
            WorksheetField::Memo => &data.memo,
            WorksheetField::GarmentType => &data.garment_type,
            WorksheetField::Size => &data.size,
        };
        CellValue::text(text)
    }
}

/// Content of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

impl CellValue {
    fn text(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            CellValue::Blank
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Blank => Ok(()),
        }
    }
}

/// Non-fatal problems found while mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// No measurements for this garment and size; the measurement cells stay
    /// blank
    LookupTableMiss { garment: String, size: String },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::LookupTableMiss { garment, size } => write!(
                f,
                "no measurements for garment '{garment}' in size '{size}'; measurement cells left blank"
            ),
        }
    }
}

/// Fixed cell contract of the worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetTemplate {
    pub sheet_name: String,
    /// Static label cells written before any data
    pub labels: Vec<(CellRef, String)>,
    pub fields: Vec<(WorksheetField, CellRef)>,
    /// First of the ten consecutive measurement cells in one row
    pub measurement_origin: CellRef,
    /// Top-left corner of the embedded design image
    pub image_anchor: CellRef,
    pub size_chart: SizeChart,
}

impl WorksheetTemplate {
    /// The standard worksheet: labels in column A, values in column B,
    /// measurements in B18:K18 under their headers, image at D3.
    pub fn standard() -> Self {
        let value_column = 1;
        let first_row = 2;

        let fields: Vec<(WorksheetField, CellRef)> = WorksheetField::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| (*field, CellRef::new(first_row + i as u32, value_column)))
            .collect();

        let measurement_origin = CellRef::new(17, value_column);

        let mut labels = vec![(CellRef::new(0, 0), "WORKSHEET".to_string())];
        labels.extend(
            fields
                .iter()
                .map(|(field, cell)| (CellRef::new(cell.row, 0), field.label().to_string())),
        );
        labels.extend(MEASUREMENTS.iter().enumerate().map(|(i, label)| {
            (
                CellRef::new(measurement_origin.row - 1, measurement_origin.col + i as u16),
                (*label).to_string(),
            )
        }));
        labels.push((CellRef::new(measurement_origin.row, 0), "cm".to_string()));

        Self {
            sheet_name: "Worksheet".to_string(),
            labels,
            fields,
            measurement_origin,
            image_anchor: CellRef::new(2, 3),
            size_chart: SizeChart::standard(),
        }
    }

    /// The ten measurement cells, left to right.
    pub fn measurement_cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (0..MEASUREMENTS.len() as u16).map(|i| self.measurement_origin.right(i))
    }

    /// Cell assigned to `field`, if the template has one.
    pub fn cell_for(&self, field: WorksheetField) -> Option<CellRef> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, cell)| *cell)
    }
}

impl Default for WorksheetTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

/// Values assigned to template cells, before rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksheetLayout {
    pub cells: BTreeMap<CellRef, CellValue>,
    pub warnings: Vec<LayoutWarning>,
}

impl WorksheetLayout {
    /// Value at an A1 address; `None` for unmapped or malformed addresses.
    pub fn value_at(&self, address: &str) -> Option<&CellValue> {
        let cell = address.parse::<CellRef>().ok()?;
        self.cells.get(&cell)
    }
}

fn measurements_for(data: &WorksheetData, chart: &SizeChart) -> Option<[f64; 10]> {
    let garment = data.garment_type.parse::<GarmentType>().ok()?;
    let size = data.size.parse::<SampleSize>().ok()?;
    chart.lookup(garment, size)
}

/// Assigns `data` to the cells of `template`.
///
/// Never fails. When the garment type and size have no entry in the size
/// chart the ten measurement cells are left blank, a warning is attached to
/// the layout and logged.
pub fn map_worksheet(data: &WorksheetData, template: &WorksheetTemplate) -> WorksheetLayout {
    let mut layout = WorksheetLayout::default();

    for (field, cell) in &template.fields {
        layout.cells.insert(*cell, field.value(data));
    }

    match measurements_for(data, &template.size_chart) {
        Some(measurements) => {
            for (cell, value) in template.measurement_cells().zip(measurements) {
                layout.cells.insert(cell, CellValue::Number(value));
            }
        }
        None => {
            let warning = LayoutWarning::LookupTableMiss {
                garment: data.garment_type.clone(),
                size: data.size.clone(),
            };
            warn!("Worksheet {warning}");
            for cell in template.measurement_cells() {
                layout.cells.insert(cell, CellValue::Blank);
            }
            layout.warnings.push(warning);
        }
    }

    layout
}
