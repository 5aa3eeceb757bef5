//! Marketplace backend interface.
//!
//! The engines in this crate consume the backend only through
//! [`MarketplaceApi`], so tests can substitute recording fakes and the CLI
//! can plug in [`HttpMarketplaceApi`].

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Bid, BidLookup, NewBid, QuoteOrder, Submission, SubmissionPayload},
};

mod config;
#[cfg(test)]
pub(crate) mod fake;
mod http;

pub use config::{ApiConfig, DEFAULT_TIMEOUT_SECS};
pub use http::HttpMarketplaceApi;

/// Operations the marketplace backend offers to this client.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Creates product, order and request order from a finished draft.
    async fn create_order(&self, payload: &SubmissionPayload) -> Result<Submission>;

    /// Asks whether the acting factory already bid on `order_id`.
    async fn has_factory_bid(&self, order_id: u64) -> Result<BidLookup>;

    /// Creates a bid. Conflicts surface as `MarketError::DuplicateBid`.
    async fn create_bid(&self, bid: &NewBid) -> Result<Bid>;

    /// Replaces the editable fields of an existing, still pending bid.
    async fn update_bid(&self, bid_id: u64, bid: &NewBid) -> Result<Bid>;

    /// Orders that still need quotes, as visible to the acting factory.
    async fn list_quote_orders(&self) -> Result<Vec<QuoteOrder>>;

    /// Downloads an image referenced by an order (worksheet embedding).
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}
