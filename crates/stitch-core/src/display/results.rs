//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{BidReceipt, Submission};

/// Outcome of a create operation: a headline followed by the resource.
///
/// # Examples
///
/// ```rust
/// use stitch_core::{display::CreateResult, models::Submission};
///
/// let result = CreateResult::new(Submission {
///     product_id: 1,
///     order_id: 2,
///     request_order_id: 3,
/// });
/// assert!(result.to_string().starts_with("Submitted order 2"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Wraps a freshly created resource.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Submission> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Submitted order {}", self.resource.order_id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<BidReceipt> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Placed bid with ID: {}", self.resource.bid.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update operation, optionally listing what changed.
///
/// # Examples
///
/// ```rust
/// use stitch_core::{
///     display::UpdateResult,
///     models::{Bid, BidDecision, BidReceipt},
/// };
///
/// let receipt = BidReceipt {
///     bid: Bid {
///         id: 9,
///         order: 34,
///         work_price: Some(15000.0),
///         estimated_delivery_days: Some(7),
///         notes: None,
///         status: BidDecision::Pending,
///         factory_info: None,
///     },
///     total_price: 4_500_000.0,
///     estimated_delivery_days: 7,
/// };
/// let output = UpdateResult::with_changes(receipt, vec!["Notes".to_string()]).to_string();
/// assert!(output.starts_with("Updated bid with ID: 9"));
/// assert!(output.contains("Changes made:\n- Notes"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// An update with no change list; only the resource is shown.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// An update whose `changes` are listed above the resource, one per line.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<BidReceipt> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated bid with ID: {}", self.resource.bid.id)?;
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}
