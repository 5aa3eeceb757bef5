//! Core library for the Stitch garment-order marketplace client.
//!
//! The crate holds the client-side logic of a marketplace where brands order
//! garment production from factories:
//!
//! - [`draft`]: accumulates a six-step manufacturing order across wizard
//!   screens, validates each step and submits the finished draft
//! - [`bids`]: annotates a factory's quote list with its own bid status,
//!   decides whether a bid may be placed or edited, and places it
//! - [`worksheet`]: maps an order onto a fixed spreadsheet layout with a
//!   graded size chart and renders it to xlsx
//!
//! The backend is reached only through [`api::MarketplaceApi`] and drafts
//! are persisted only through [`store::DraftStore`], so both can be swapped
//! in tests.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown, and
//! [`display`] adds wrappers for lists, validation summaries and operation
//! results. The CLI prints them through its terminal renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use stitch_core::{
//!     draft::{DraftAggregatorBuilder, Navigation},
//!     models::{ProductStep, StepData, StepKey},
//! };
//!
//! let aggregator = DraftAggregatorBuilder::new().in_memory().build();
//! aggregator
//!     .save_step(StepData::Product(ProductStep {
//!         name: "Boxy tee".to_string(),
//!         season: "2025 SS".to_string(),
//!         target_customer_code: "W20".to_string(),
//!         concept: "Heavyweight basics".to_string(),
//!     }))
//!     .unwrap();
//!
//! assert_eq!(
//!     aggregator.advance(StepKey::Product),
//!     Navigation::Next(StepKey::Design)
//! );
//! ```

pub mod api;
pub mod bids;
pub mod db;
pub mod display;
pub mod draft;
pub mod error;
pub mod models;
pub mod params;
pub mod store;
pub mod worksheet;

// Re-export commonly used types
pub use api::{ApiConfig, HttpMarketplaceApi, MarketplaceApi};
pub use bids::{BidAction, BidEngine};
pub use db::Database;
pub use display::{CreateResult, FieldProblems, OperationStatus, QuoteOrders, UpdateResult};
pub use draft::{DraftAggregator, DraftAggregatorBuilder, FieldProblem, Navigation};
pub use error::{FailureKind, MarketError, Result};
pub use models::{
    AnnotatedOrder, Bid, BidReceipt, BidStatus, DesignFile, Draft, OrderStatus, QuoteOrder,
    SampleSize, StepData, StepKey, Submission, SubmissionPayload,
};
pub use params::{BidForm, ListQuotes, SortKey};
pub use store::{DraftStore, FallbackStore, MemoryDraftStore, SqliteDraftStore};
pub use worksheet::{WorksheetData, WorksheetLayout, WorksheetTemplate};
