//! Markdown display wrappers.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as list headers, validation summaries
//! and operation headlines. All output is markdown and is rendered by the
//! CLI's terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Display Wrappers│    │    Markdown     │
//! │ (Draft, Order)  │───▶│ & Result Types  │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use stitch_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Draft cleared");
//! assert_eq!(status.to_string(), "Success: Draft cleared\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{FieldProblems, QuoteOrders};
pub use datetime::{DisplayDate, LocalDateTime};
pub use results::{CreateResult, UpdateResult};
pub use status::{OperationStatus, StatusLevel};
