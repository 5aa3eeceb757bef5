//! Quote orders as seen by a factory, and their annotated form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    lenient::{opt_f64, opt_u64},
    BidStatus, OrderStatus,
};

/// Product details embedded in a quote order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "designer_name")]
    pub designer_name: Option<String>,
    /// Raw due date as sent by the backend; parsed lazily when sorting
    #[serde(default, alias = "due_date")]
    pub due_date: Option<String>,
    #[serde(default, alias = "work_sheet_url")]
    pub work_sheet_url: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    /// Fields this client does not interpret but must round-trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A backend order that still needs quotes, projected for one factory.
///
/// Three identifiers travel together and must not be confused: `id` is the
/// listing row id, `order_id` is the order record, and `request_order_id`
/// is the key bids are created against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOrder {
    #[serde(default)]
    pub id: u64,
    #[serde(alias = "order_id")]
    pub order_id: u64,
    #[serde(alias = "request_order_id")]
    pub request_order_id: u64,
    #[serde(default, deserialize_with = "opt_u64")]
    pub quantity: Option<u64>,
    #[serde(default, alias = "product_info")]
    pub product_info: ProductInfo,
    pub status: OrderStatus,
    #[serde(default, alias = "work_price", deserialize_with = "opt_f64")]
    pub work_price: Option<f64>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
}

impl QuoteOrder {
    /// Work price recorded for this order, if it is a positive amount.
    ///
    /// Absent, null, zero and negative prices all mean "no price yet".
    pub fn recorded_price(&self) -> Option<f64> {
        self.work_price.filter(|p| *p > 0.0)
    }

    /// Display name for the product, falling back to the order id.
    pub fn display_name(&self) -> String {
        self.product_info
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Order #{}", self.order_id))
    }
}

/// A quote order together with the acting factory's bid state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedOrder {
    #[serde(flatten)]
    pub order: QuoteOrder,
    pub bid_status: BidStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_id: Option<u64>,
    /// Lookup failure message when `bid_status` is `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_error: Option<String>,
}

impl AnnotatedOrder {
    /// Wraps an order whose bid lookup has not completed yet.
    pub fn checking(order: QuoteOrder) -> Self {
        Self {
            order,
            bid_status: BidStatus::Checking,
            bid_id: None,
            lookup_error: None,
        }
    }
}

impl AsRef<QuoteOrder> for QuoteOrder {
    fn as_ref(&self) -> &QuoteOrder {
        self
    }
}

impl AsRef<QuoteOrder> for AnnotatedOrder {
    fn as_ref(&self) -> &QuoteOrder {
        &self.order
    }
}
