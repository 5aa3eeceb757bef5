//! Factory-side bid reconciliation.
//!
//! Given the quote orders visible to a factory, this module works out which
//! ones the factory has already bid on, which bid operation each order
//! allows, and submits or edits bids.
//!
//! # Usage
//!
//! ```rust,no_run
//! use stitch_core::{
//!     api::{ApiConfig, HttpMarketplaceApi},
//!     bids::BidEngine,
//!     params::ListQuotes,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpMarketplaceApi::new(ApiConfig::new("https://api.example.com")?)?;
//! let engine = BidEngine::new(api);
//! for order in engine.list_quotes(&ListQuotes::default()).await? {
//!     println!("{} {}", order.order.display_name(), order.bid_status);
//! }
//! # Ok(())
//! # }
//! ```

use jiff::Timestamp;
use log::{info, warn};

use crate::{
    api::MarketplaceApi,
    error::{MarketError, Result},
    models::{AnnotatedOrder, BidReceipt, NewBid, QuoteOrder},
    params::{BidForm, ListQuotes},
};

mod annotate;
mod gating;
mod pricing;
mod sort;


pub use annotate::{annotate_with_bid_status, settle_all};
pub use gating::{can_edit_bid, can_submit_bid, next_action, BidAction, BidEvent, BidPhase};
pub use pricing::{estimated_delivery_days, format_won, DEFAULT_DELIVERY_DAYS};
pub use sort::sort_orders;

/// Bid operations for the acting factory, backed by a [`MarketplaceApi`].
pub struct BidEngine<A> {
    api: A,
    now: Option<Timestamp>,
}

impl<A: MarketplaceApi> BidEngine<A> {
    pub fn new(api: A) -> Self {
        Self { api, now: None }
    }

    /// Pins the clock used for delivery estimates.
    pub fn with_now(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn now(&self) -> Timestamp {
        self.now.unwrap_or_else(Timestamp::now)
    }

    /// Annotates `orders` with the acting factory's bid status.
    pub async fn annotate(&self, orders: Vec<QuoteOrder>) -> Vec<AnnotatedOrder> {
        annotate_with_bid_status(orders, |order_id| self.api.has_factory_bid(order_id)).await
    }

    /// Fetches, annotates and sorts the factory's quote list.
    pub async fn list_quotes(&self, params: &ListQuotes) -> Result<Vec<AnnotatedOrder>> {
        let orders = self.api.list_quote_orders().await?;
        let mut annotated = self.annotate(orders).await;
        sort_orders(&mut annotated, params.sort);
        Ok(annotated)
    }

    /// Looks up one quote order by its `order_id`.
    ///
    /// # Errors
    ///
    /// * `MarketError::InvalidInput` - When the factory cannot see the order
    pub async fn find_quote(&self, order_id: u64) -> Result<QuoteOrder> {
        self.api
            .list_quote_orders()
            .await?
            .into_iter()
            .find(|order| order.order_id == order_id)
            .ok_or_else(|| {
                MarketError::invalid_input("order_id")
                    .with_reason(format!("order {order_id} is not in the quote list"))
            })
    }

    fn new_bid(&self, order: &QuoteOrder, form: &BidForm) -> Result<(NewBid, f64)> {
        let work_price = form.validated_price()?;
        let bid = NewBid {
            order: order.request_order_id,
            work_price,
            estimated_delivery_days: estimated_delivery_days(form.delivery_date, self.now()),
            notes: form.notes.trim().to_string(),
        };
        let total_price = work_price * order.quantity.unwrap_or(0) as f64;
        Ok((bid, total_price))
    }

    /// Places a new bid on `order`.
    ///
    /// # Errors
    ///
    /// * `MarketError::InvalidInput` - When the order does not accept bids or
    ///   the unit price is missing or not positive
    /// * `MarketError::DuplicateBid` - When the factory already bid on it
    /// * `MarketError::SubmissionFailed` - For transport and server failures
    pub async fn submit_bid(&self, order: &QuoteOrder, form: &BidForm) -> Result<BidReceipt> {
        if !can_submit_bid(order) {
            return Err(MarketError::invalid_input("order").with_reason(format!(
                "order {} does not accept new bids ({})",
                order.order_id,
                order.status.label()
            )));
        }

        let expected = BidPhase::NoBid.apply(BidEvent::Place)?;
        let (new_bid, total_price) = self.new_bid(order, form)?;
        let bid = self.api.create_bid(&new_bid).await?;
        info!(
            "Bid {} placed on request order {} for {} won",
            bid.id,
            new_bid.order,
            format_won(total_price)
        );

        Ok(checked_receipt(
            BidReceipt {
                bid,
                total_price,
                estimated_delivery_days: new_bid.estimated_delivery_days,
            },
            expected,
        ))
    }

    /// Replaces the price, schedule and notes of the factory's pending bid.
    ///
    /// # Errors
    ///
    /// * `MarketError::InvalidInput` - When the order's bid cannot be edited
    ///   or the unit price is missing or not positive
    /// * `MarketError::SubmissionFailed` - For transport and server failures
    pub async fn edit_bid(&self, order: &QuoteOrder, bid_id: u64, form: &BidForm) -> Result<BidReceipt> {
        if !can_edit_bid(order) {
            return Err(MarketError::invalid_input("order").with_reason(format!(
                "the bid on order {} can no longer be edited ({})",
                order.order_id,
                order.status.label()
            )));
        }

        let expected = BidPhase::Submitted.apply(BidEvent::Edit)?;
        let (new_bid, total_price) = self.new_bid(order, form)?;
        let bid = self.api.update_bid(bid_id, &new_bid).await?;
        info!("Bid {bid_id} on request order {} updated", new_bid.order);

        Ok(checked_receipt(
            BidReceipt {
                bid,
                total_price,
                estimated_delivery_days: new_bid.estimated_delivery_days,
            },
            expected,
        ))
    }
}

/// Logs when the backend reports a phase other than the one the operation leads to.
fn checked_receipt(receipt: BidReceipt, expected: BidPhase) -> BidReceipt {
    let reported = receipt.phase();
    if reported != expected {
        warn!(
            "Bid {} is reported as {} after the operation, expected {}",
            receipt.bid.id,
            reported.label(),
            expected.label()
        );
    }
    receipt
}
