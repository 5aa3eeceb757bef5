//! Built-in garment size chart.
//!
//! Each garment has a base M measurement set and a per-size grading step.
//! Other sizes are graded from M; `Free` uses the L row.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::SampleSize;

/// Measurement labels, in the order they are written to the sheet.
pub const MEASUREMENTS: [&str; 10] = [
    "Total length",
    "Shoulder width",
    "Chest width",
    "Waist width",
    "Hem width",
    "Armhole",
    "Sleeve length",
    "Sleeve width",
    "Cuff width",
    "Neck width",
];

/// Ten measurements in centimetres.
pub type Measurements = [f64; 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentType {
    ShortSleeveTee,
    LongSleeveTee,
    Sweatshirt,
    Hoodie,
    Shirt,
}

impl GarmentType {
    pub const ALL: [GarmentType; 5] = [
        GarmentType::ShortSleeveTee,
        GarmentType::LongSleeveTee,
        GarmentType::Sweatshirt,
        GarmentType::Hoodie,
        GarmentType::Shirt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GarmentType::ShortSleeveTee => "Short sleeve tee",
            GarmentType::LongSleeveTee => "Long sleeve tee",
            GarmentType::Sweatshirt => "Sweatshirt",
            GarmentType::Hoodie => "Hoodie",
            GarmentType::Shirt => "Shirt",
        }
    }
}

impl FromStr for GarmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "short_sleeve_tee" | "short_sleeve" | "tee" | "t_shirt" | "tshirt" => {
                Ok(GarmentType::ShortSleeveTee)
            }
            "long_sleeve_tee" | "long_sleeve" | "long_sleeve_t_shirt" => Ok(GarmentType::LongSleeveTee),
            "sweatshirt" | "crewneck" | "mtm" => Ok(GarmentType::Sweatshirt),
            "hoodie" | "hooded_sweatshirt" => Ok(GarmentType::Hoodie),
            "shirt" | "button_up" | "dress_shirt" => Ok(GarmentType::Shirt),
            _ => Err(format!("Unknown garment type: {s}")),
        }
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Base measurements and grading for one garment.
#[derive(Debug, Clone, PartialEq)]
pub struct GarmentSpec {
    pub garment: GarmentType,
    /// Measurements of size M
    pub base: Measurements,
    /// Change per size step away from M
    pub grade: Measurements,
}

/// Garment type and size to measurement lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeChart {
    specs: Vec<GarmentSpec>,
}

fn size_steps(size: SampleSize) -> f64 {
    match size {
        SampleSize::XS => -2.0,
        SampleSize::S => -1.0,
        SampleSize::M => 0.0,
        SampleSize::L | SampleSize::Free => 1.0,
        SampleSize::XL => 2.0,
        SampleSize::XXL => 3.0,
    }
}

impl SizeChart {
    pub fn new(specs: Vec<GarmentSpec>) -> Self {
        Self { specs }
    }

    /// The chart shipped with the worksheet template.
    pub fn standard() -> Self {
        Self::new(vec![
            GarmentSpec {
                garment: GarmentType::ShortSleeveTee,
                base: [70.0, 46.0, 52.0, 50.0, 51.0, 23.0, 21.0, 19.0, 16.5, 18.0],
                grade: [2.0, 1.5, 2.0, 2.0, 2.0, 1.0, 0.5, 0.75, 0.5, 0.5],
            },
            GarmentSpec {
                garment: GarmentType::LongSleeveTee,
                base: [70.0, 46.0, 52.0, 50.0, 51.0, 23.0, 61.0, 19.0, 9.5, 18.0],
                grade: [2.0, 1.5, 2.0, 2.0, 2.0, 1.0, 1.0, 0.75, 0.25, 0.5],
            },
            GarmentSpec {
                garment: GarmentType::Sweatshirt,
                base: [68.0, 52.0, 58.0, 56.0, 50.0, 25.0, 60.0, 21.0, 10.0, 19.0],
                grade: [2.0, 2.0, 2.5, 2.5, 2.5, 1.0, 1.0, 1.0, 0.25, 0.5],
            },
            GarmentSpec {
                garment: GarmentType::Hoodie,
                base: [70.0, 54.0, 60.0, 58.0, 52.0, 26.0, 61.0, 22.0, 10.0, 20.0],
                grade: [2.0, 2.0, 2.5, 2.5, 2.5, 1.0, 1.0, 1.0, 0.25, 0.5],
            },
            GarmentSpec {
                garment: GarmentType::Shirt,
                base: [76.0, 47.0, 56.0, 54.0, 55.0, 24.0, 63.0, 20.0, 12.0, 17.0],
                grade: [1.5, 1.5, 2.0, 2.0, 2.0, 1.0, 1.0, 0.75, 0.5, 0.5],
            },
        ])
    }

    /// Measurements for `garment` in `size`, or `None` when the chart has no
    /// row for the garment.
    pub fn lookup(&self, garment: GarmentType, size: SampleSize) -> Option<Measurements> {
        let spec = self.specs.iter().find(|s| s.garment == garment)?;
        let steps = size_steps(size);
        let mut graded = spec.base;
        for (value, grade) in graded.iter_mut().zip(spec.grade) {
            *value = ((*value + grade * steps) * 10.0).round() / 10.0;
        }
        Some(graded)
    }
}

impl Default for SizeChart {
    fn default() -> Self {
        Self::standard()
    }
}
