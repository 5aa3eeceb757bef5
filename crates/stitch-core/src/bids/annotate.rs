//! Concurrent bid-status annotation of the quote list.

use std::future::Future;

use futures::future::join_all;
use log::{debug, warn};

use crate::{
    error::{MarketError, Result},
    models::{AnnotatedOrder, BidLookup, BidStatus, QuoteOrder},
};

/// Runs every future to completion and returns their outcomes in input
/// order. One failure does not cancel or hide the others.
pub async fn settle_all<I, F, T>(futures: I) -> Vec<Result<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>>,
{
    join_all(futures).await
}

/// Annotates each order with whether the acting factory has already bid.
///
/// Lookups run concurrently, keyed by `order_id`. The result is
/// index-aligned with `orders`: a failed lookup marks only its own row as
/// [`BidStatus::Error`] and leaves the order data intact. This never fails
/// as a whole.
pub async fn annotate_with_bid_status<L, Fut>(orders: Vec<QuoteOrder>, lookup: L) -> Vec<AnnotatedOrder>
where
    L: Fn(u64) -> Fut,
    Fut: Future<Output = Result<BidLookup>>,
{
    let outcomes = settle_all(orders.iter().map(|order| lookup(order.order_id))).await;

    let annotated: Vec<AnnotatedOrder> = orders
        .into_iter()
        .zip(outcomes)
        .map(|(order, outcome)| annotate_one(order, outcome))
        .collect();

    let failed = annotated
        .iter()
        .filter(|a| a.bid_status == BidStatus::Error)
        .count();
    debug!("Annotated {} orders ({failed} lookups failed)", annotated.len());
    annotated
}

fn annotate_one(order: QuoteOrder, outcome: Result<BidLookup>) -> AnnotatedOrder {
    let mut annotated = AnnotatedOrder::checking(order);
    match outcome {
        Ok(BidLookup { has_bid: true, bid_id }) => {
            annotated.bid_status = BidStatus::Submitted;
            annotated.bid_id = bid_id;
        }
        Ok(BidLookup { has_bid: false, .. }) => annotated.bid_status = BidStatus::Pending,
        Err(e) => {
            let failure = MarketError::LookupFailed {
                order_id: annotated.order.order_id,
                message: e.to_string(),
            };
            warn!("{failure}");
            annotated.bid_status = BidStatus::Error;
            annotated.lookup_error = Some(e.to_string());
        }
    }
    annotated
}
