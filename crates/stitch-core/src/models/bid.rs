//! Factory bids and the payloads exchanged with the bid endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    lenient::{opt_f64, opt_u64},
    BidDecision,
};
use crate::bids::BidPhase;

/// Factory details attached to a bid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FactoryInfo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, alias = "company_name")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A factory's price and schedule offer against one request order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bid {
    pub id: u64,
    /// The request order id this bid belongs to
    pub order: u64,
    #[serde(default, alias = "unit_price", deserialize_with = "opt_f64")]
    pub work_price: Option<f64>,
    #[serde(default, deserialize_with = "opt_u64")]
    pub estimated_delivery_days: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BidDecision,
    #[serde(default)]
    pub factory_info: Option<FactoryInfo>,
}

/// Body sent to the bid creation and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBid {
    /// Always the order's `request_order_id`, never its listing or order id
    pub order: u64,
    pub work_price: f64,
    pub estimated_delivery_days: u32,
    pub notes: String,
}

/// Answer of the "has this factory bid on the order" endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BidLookup {
    pub has_bid: bool,
    #[serde(default)]
    pub bid_id: Option<u64>,
}

/// Result of a successful bid submission or edit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BidReceipt {
    pub bid: Bid,
    /// `work_price * quantity`, for display only; never sent to the backend
    pub total_price: f64,
    pub estimated_delivery_days: u32,
}

impl BidReceipt {
    /// Lifecycle phase the backend reports for the returned bid.
    pub fn phase(&self) -> BidPhase {
        BidPhase::from_decision(self.bid.status)
    }
}
