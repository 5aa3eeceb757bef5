//! `reqwest`-backed implementation of [`MarketplaceApi`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde::{de::DeserializeOwned, Deserialize};

use super::{ApiConfig, MarketplaceApi};
use crate::{
    error::{FailureKind, MarketError, Result},
    models::{Bid, BidLookup, NewBid, QuoteOrder, Submission, SubmissionPayload},
};

const ORDERS_PATH: &str = "manufacturing/orders/";
const QUOTES_PATH: &str = "factory/quotes/";
const BIDS_PATH: &str = "bids/";
const MAX_ERROR_BODY: usize = 300;

/// A request that did not produce a 2xx response.
#[derive(Debug)]
struct Failure {
    kind: FailureKind,
    message: String,
}

impl From<reqwest::Error> for Failure {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            FailureKind::Timeout
        } else if let Some(status) = e.status() {
            FailureKind::from_status(status.as_u16())
        } else {
            FailureKind::Network
        };
        Failure {
            kind,
            message: e.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuoteList {
    Plain(Vec<QuoteOrder>),
    Paged { results: Vec<QuoteOrder> },
}

/// HTTP client for the marketplace REST API.
pub struct HttpMarketplaceApi {
    client: Client,
    config: ApiConfig,
}

impl HttpMarketplaceApi {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Configuration` when the TLS backend cannot be
    /// initialized.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MarketError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> std::result::Result<Vec<u8>, Failure> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            return Ok(body);
        }

        let failure = Failure {
            kind: FailureKind::from_status(status.as_u16()),
            message: error_message(&body),
        };
        warn!("Backend answered {status}: {}", failure.message);
        Err(failure)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {url}");
        let body = self
            .execute(self.client.get(url))
            .await
            .map_err(|f| MarketError::api(f.kind, f.message))?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_bid(&self, request: RequestBuilder, bid: &NewBid) -> Result<Bid> {
        match self.execute(request.json(bid)).await {
            Ok(body) => Ok(serde_json::from_slice(&body)?),
            Err(failure) if is_duplicate_bid(&failure) => Err(MarketError::DuplicateBid {
                request_order_id: bid.order,
            }),
            Err(failure) => Err(MarketError::submission(failure.kind, failure.message)),
        }
    }
}

/// Conflicts arrive either as 409 or as a 400 from the unique constraint
/// on (order, factory).
fn is_duplicate_bid(failure: &Failure) -> bool {
    match failure.kind {
        FailureKind::Rejected { status: 409 } => true,
        FailureKind::Rejected { status: 400 } => {
            let message = failure.message.to_lowercase();
            message.contains("unique") || message.contains("already")
        }
        _ => false,
    }
}

/// Extracts a short human readable message from an error body.
fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("message"))
                .and_then(|d| d.as_str().map(String::from))
        })
        .unwrap_or_else(|| text.trim().to_string());

    if message.chars().count() > MAX_ERROR_BODY {
        let truncated: String = message.chars().take(MAX_ERROR_BODY).collect();
        format!("{truncated}…")
    } else if message.is_empty() {
        "empty response body".to_string()
    } else {
        message
    }
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceApi {
    async fn create_order(&self, payload: &SubmissionPayload) -> Result<Submission> {
        let mut form = Form::new();
        for (name, value) in &payload.fields {
            form = form.text(name.clone(), value.clone());
        }
        if let Some(image) = &payload.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|e| {
                    MarketError::invalid_input(SubmissionPayload::IMAGE_FIELD)
                        .with_reason(e.to_string())
                })?;
            form = form.part(SubmissionPayload::IMAGE_FIELD, part);
        }

        let url = self.config.url(ORDERS_PATH);
        debug!("POST {url} ({} fields)", payload.fields.len());
        let body = self
            .execute(self.client.post(&url).multipart(form))
            .await
            .map_err(|f| MarketError::submission(f.kind, f.message))?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn has_factory_bid(&self, order_id: u64) -> Result<BidLookup> {
        let url = self.config.url(&format!("{BIDS_PATH}check/{order_id}/"));
        self.get_json(&url).await
    }

    async fn create_bid(&self, bid: &NewBid) -> Result<Bid> {
        let url = self.config.url(BIDS_PATH);
        debug!("POST {url} (request order {})", bid.order);
        self.send_bid(self.client.post(&url), bid).await
    }

    async fn update_bid(&self, bid_id: u64, bid: &NewBid) -> Result<Bid> {
        let url = self.config.url(&format!("{BIDS_PATH}{bid_id}/"));
        debug!("PATCH {url}");
        self.send_bid(self.client.patch(&url), bid).await
    }

    async fn list_quote_orders(&self) -> Result<Vec<QuoteOrder>> {
        let url = self.config.url(QUOTES_PATH);
        let list: QuoteList = self.get_json(&url).await?;
        Ok(match list {
            QuoteList::Plain(orders) | QuoteList::Paged { results: orders } => orders,
        })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.config.url(url)
        };
        debug!("GET {url} (image)");
        self.execute(self.client.get(&url))
            .await
            .map_err(|f| MarketError::api(f.kind, f.message))
    }
}
