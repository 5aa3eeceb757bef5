//! Recording in-process backend for unit tests.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use super::MarketplaceApi;
use crate::{
    error::{FailureKind, MarketError, Result},
    models::{Bid, BidDecision, BidLookup, NewBid, QuoteOrder, Submission, SubmissionPayload},
};

#[derive(Default)]
pub(crate) struct FakeApi {
    pub submission: Mutex<Option<Submission>>,
    pub order_failure: Mutex<Option<FailureKind>>,
    pub lookups: Mutex<HashMap<u64, Result<BidLookup>>>,
    pub quotes: Mutex<Vec<QuoteOrder>>,
    pub images: Mutex<HashMap<String, Vec<u8>>>,
    pub duplicate_bid: Mutex<bool>,
    pub payloads: Mutex<Vec<SubmissionPayload>>,
    pub created_bids: Mutex<Vec<NewBid>>,
    pub updated_bids: Mutex<Vec<(u64, NewBid)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepting(submission: Submission) -> Self {
        let api = Self::new();
        *lock(&api.submission) = Some(submission);
        api
    }

    pub fn failing(kind: FailureKind) -> Self {
        let api = Self::new();
        *lock(&api.order_failure) = Some(kind);
        api
    }

    pub fn with_quotes(self, quotes: Vec<QuoteOrder>) -> Self {
        *lock(&self.quotes) = quotes;
        self
    }

    pub fn with_lookup(self, order_id: u64, lookup: Result<BidLookup>) -> Self {
        lock(&self.lookups).insert(order_id, lookup);
        self
    }

    pub fn with_image(self, url: &str, bytes: Vec<u8>) -> Self {
        lock(&self.images).insert(url.to_string(), bytes);
        self
    }

    pub fn rejecting_duplicates(self) -> Self {
        *lock(&self.duplicate_bid) = true;
        self
    }

    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        lock(&self.payloads).clone()
    }

    pub fn created_bids(&self) -> Vec<NewBid> {
        lock(&self.created_bids).clone()
    }

    pub fn updated_bids(&self) -> Vec<(u64, NewBid)> {
        lock(&self.updated_bids).clone()
    }

    fn echo(id: u64, bid: &NewBid) -> Bid {
        Bid {
            id,
            order: bid.order,
            work_price: Some(bid.work_price),
            estimated_delivery_days: Some(u64::from(bid.estimated_delivery_days)),
            notes: Some(bid.notes.clone()),
            status: BidDecision::Pending,
            factory_info: None,
        }
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    async fn create_order(&self, payload: &SubmissionPayload) -> Result<Submission> {
        lock(&self.payloads).push(payload.clone());
        if let Some(kind) = *lock(&self.order_failure) {
            return Err(MarketError::submission(kind, "scripted failure"));
        }
        (*lock(&self.submission)).ok_or_else(|| {
            MarketError::submission(FailureKind::Server { status: 500 }, "no scripted submission")
        })
    }

    async fn has_factory_bid(&self, order_id: u64) -> Result<BidLookup> {
        match lock(&self.lookups).get(&order_id) {
            Some(Ok(lookup)) => Ok(*lookup),
            Some(Err(e)) => Err(MarketError::api(FailureKind::Network, e.to_string())),
            None => Ok(BidLookup::default()),
        }
    }

    async fn create_bid(&self, bid: &NewBid) -> Result<Bid> {
        if *lock(&self.duplicate_bid) {
            return Err(MarketError::DuplicateBid {
                request_order_id: bid.order,
            });
        }
        let mut created = lock(&self.created_bids);
        created.push(bid.clone());
        Ok(Self::echo(created.len() as u64, bid))
    }

    async fn update_bid(&self, bid_id: u64, bid: &NewBid) -> Result<Bid> {
        lock(&self.updated_bids).push((bid_id, bid.clone()));
        Ok(Self::echo(bid_id, bid))
    }

    async fn list_quote_orders(&self) -> Result<Vec<QuoteOrder>> {
        Ok(lock(&self.quotes).clone())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        lock(&self.images)
            .get(url)
            .cloned()
            .ok_or_else(|| MarketError::api(FailureKind::Rejected { status: 404 }, "no such image"))
    }
}
