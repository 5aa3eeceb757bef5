//! Data models for drafts, quote orders and bids.
//!
//! This module contains the domain records exchanged between the wizard
//! screens, the draft store and the marketplace backend. Display
//! implementations live in [`crate::display`] so that formatting stays out
//! of the data definitions.
//!
//! ## Identifier Discipline
//!
//! Orders carry three distinct identifiers and each has exactly one use:
//!
//! - `QuoteOrder::id`: the listing row id, only used for display
//! - `QuoteOrder::order_id`: the order record, used for bid-status lookups
//! - `QuoteOrder::request_order_id`: the foreign key every bid references
//!
//! # Examples
//!
//! ```rust
//! use stitch_core::models::{Draft, ProductStep, StepData, StepKey};
//!
//! let mut draft = Draft::default();
//! draft.apply(StepData::Product(ProductStep {
//!     name: "Boxy tee".to_string(),
//!     season: "2025 SS".to_string(),
//!     target_customer_code: "W20".to_string(),
//!     concept: "Relaxed heavyweight basics".to_string(),
//! }));
//! assert_eq!(draft.saved_steps(), vec![StepKey::Product]);
//! ```

pub mod bid;
pub mod draft;
mod lenient;
pub mod order;
pub mod payload;
pub mod status;


pub use bid::{Bid, BidLookup, BidReceipt, FactoryInfo, NewBid};
pub use draft::{
    DesignStep, Draft, DraftKey, MaterialsStep, NotesStep, ProductStep, ScheduleStep, StepData,
    StepKey, Submission, SUGGESTED_ACCESSORIES, SUGGESTED_FABRICS,
};
pub(crate) use lenient::{epoch_millis, opt_u64};
pub use lenient::parse_instant;
pub use order::{AnnotatedOrder, ProductInfo, QuoteOrder};
pub use payload::{DesignFile, SubmissionPayload};
pub use status::{BidDecision, BidStatus, OrderStatus, SampleSize};
