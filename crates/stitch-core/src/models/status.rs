//! Status enumerations for quote orders, bids and draft sizes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Backend lifecycle state of a request order.
///
/// `Unknown` absorbs states added on the backend later so that a single
/// unexpected value does not fail the whole quote list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    SamplePending,
    SampleMatched,
    ProductPending,
    ProductMatched,
    Finished,
    Responded,
    Confirmed,
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::SamplePending => "sample_pending",
            OrderStatus::SampleMatched => "sample_matched",
            OrderStatus::ProductPending => "product_pending",
            OrderStatus::ProductMatched => "product_matched",
            OrderStatus::Finished => "finished",
            OrderStatus::Responded => "responded",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Unknown => "unknown",
        }
    }

    /// Human readable label used in list views.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Awaiting quote",
            OrderStatus::SamplePending => "Sample quote pending",
            OrderStatus::SampleMatched => "Sample matched",
            OrderStatus::ProductPending => "Production quote pending",
            OrderStatus::ProductMatched => "Production matched",
            OrderStatus::Finished => "Finished",
            OrderStatus::Responded => "Responded",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "sample_pending" => Ok(OrderStatus::SamplePending),
            "sample_matched" => Ok(OrderStatus::SampleMatched),
            "product_pending" => Ok(OrderStatus::ProductPending),
            "product_matched" => Ok(OrderStatus::ProductMatched),
            "finished" => Ok(OrderStatus::Finished),
            "responded" => Ok(OrderStatus::Responded),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "accepted" => Ok(OrderStatus::Accepted),
            "rejected" => Ok(OrderStatus::Rejected),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Viewer-scoped flag: has the current factory already bid on an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    /// Lookup has not completed yet
    #[default]
    Checking,
    /// The factory has a bid on record
    Submitted,
    /// The factory has not bid yet
    Pending,
    /// The lookup failed for this row
    Error,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Checking => "checking",
            BidStatus::Submitted => "submitted",
            BidStatus::Pending => "pending",
            BidStatus::Error => "error",
        }
    }

    /// Badge text with a leading icon for list rendering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stitch_core::models::BidStatus;
    ///
    /// assert_eq!(BidStatus::Submitted.with_icon(), "✓ Bid submitted");
    /// assert_eq!(BidStatus::Error.with_icon(), "! Lookup failed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            BidStatus::Checking => "… Checking",
            BidStatus::Submitted => "✓ Bid submitted",
            BidStatus::Pending => "○ No bid yet",
            BidStatus::Error => "! Lookup failed",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Designer's decision on a bid, as recorded on the bid itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BidDecision {
    #[default]
    Pending,
    Selected,
    Rejected,
}

impl fmt::Display for BidDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BidDecision::Pending => "pending",
            BidDecision::Selected => "selected",
            BidDecision::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// Sample size requested in the schedule step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SampleSize {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
    Free,
}

impl SampleSize {
    /// Every selectable size, smallest first.
    pub const ALL: [SampleSize; 7] = [
        SampleSize::XS,
        SampleSize::S,
        SampleSize::M,
        SampleSize::L,
        SampleSize::XL,
        SampleSize::XXL,
        SampleSize::Free,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleSize::XS => "XS",
            SampleSize::S => "S",
            SampleSize::M => "M",
            SampleSize::L => "L",
            SampleSize::XL => "XL",
            SampleSize::XXL => "XXL",
            SampleSize::Free => "Free",
        }
    }
}

impl FromStr for SampleSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "XS" => Ok(SampleSize::XS),
            "S" => Ok(SampleSize::S),
            "M" => Ok(SampleSize::M),
            "L" => Ok(SampleSize::L),
            "XL" => Ok(SampleSize::XL),
            "XXL" | "2XL" => Ok(SampleSize::XXL),
            "FREE" | "F" => Ok(SampleSize::Free),
            _ => Err(format!("Invalid sample size: {s}")),
        }
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
