//! Parameter structures for stitch operations
//!
//! This module contains parameter structures shared by every interface
//! (the CLI today, a web bridge tomorrow) without framework-specific derives.
//! Interface layers define their own argument types and convert into these
//! with `From` implementations, keeping clap and friends out of the core.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │  Engine / API   │
//! │  (clap derives) │───▶│ (serde derives) │───▶│    calls        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// Ordering of the factory quote list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recently created first
    #[default]
    Default,
    /// Largest quantity first
    Quantity,
    /// Latest due date first
    DueDate,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "recent" | "latest" => Ok(SortKey::Default),
            "quantity" => Ok(SortKey::Quantity),
            "duedate" | "due_date" | "due-date" => Ok(SortKey::DueDate),
            _ => Err(format!("Invalid sort key: {s}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Default => "default",
            SortKey::Quantity => "quantity",
            SortKey::DueDate => "due_date",
        };
        write!(f, "{s}")
    }
}

/// Parameters for listing the factory's quote orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuotes {
    #[serde(default)]
    pub sort: SortKey,
}

/// Values entered in the bid form for one order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidForm {
    /// Unit (per piece) work price; must be positive
    pub work_price: Option<f64>,
    /// Promised delivery date; seven days are assumed when absent
    pub delivery_date: Option<Date>,
    #[serde(default)]
    pub notes: String,
}

impl BidForm {
    /// Validates the unit price and returns it.
    ///
    /// # Errors
    ///
    /// * `MarketError::InvalidInput` - When the price is missing, zero,
    ///   negative or not a finite number
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stitch_core::params::BidForm;
    ///
    /// let form = BidForm { work_price: Some(15000.0), ..Default::default() };
    /// assert_eq!(form.validated_price().unwrap(), 15000.0);
    ///
    /// let empty = BidForm::default();
    /// assert!(empty.validated_price().is_err());
    /// ```
    pub fn validated_price(&self) -> Result<f64> {
        match self.work_price {
            Some(price) if price.is_finite() && price > 0.0 => Ok(price),
            _ => Err(MarketError::invalid_input("work_price").with_reason("enter a unit price")),
        }
    }
}
