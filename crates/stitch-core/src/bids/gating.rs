//! Which bid operation an order currently allows.
//!
//! The two gates are pure functions of the order's status and its recorded
//! work price. Their status sets overlap, so the price decides: an order
//! without a positive price can only be bid on, an order with one can only
//! be edited. They are never both true.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{MarketError, Result},
    models::{BidDecision, OrderStatus, QuoteOrder},
};

const SUBMITTABLE: &[OrderStatus] = &[
    OrderStatus::Pending,
    OrderStatus::SamplePending,
    OrderStatus::ProductPending,
];

const EDITABLE: &[OrderStatus] = &[
    OrderStatus::Responded,
    OrderStatus::Confirmed,
    OrderStatus::SamplePending,
    OrderStatus::ProductPending,
    OrderStatus::SampleMatched,
    OrderStatus::ProductMatched,
];

/// Whether a new bid may be placed on `order`.
pub fn can_submit_bid(order: &QuoteOrder) -> bool {
    SUBMITTABLE.contains(&order.status) && order.recorded_price().is_none()
}

/// Whether the existing bid on `order` may be edited.
pub fn can_edit_bid(order: &QuoteOrder) -> bool {
    EDITABLE.contains(&order.status) && order.recorded_price().is_some()
}

/// The single action offered for an order in the quote list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidAction {
    Submit,
    Edit,
    ViewOnly,
}

impl fmt::Display for BidAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BidAction::Submit => "submit bid",
            BidAction::Edit => "edit bid",
            BidAction::ViewOnly => "view only",
        };
        write!(f, "{label}")
    }
}

/// Derives the list action from the two gates.
pub fn next_action(order: &QuoteOrder) -> BidAction {
    if can_submit_bid(order) {
        BidAction::Submit
    } else if can_edit_bid(order) {
        BidAction::Edit
    } else {
        BidAction::ViewOnly
    }
}

/// Lifecycle of one factory's bid on one request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidPhase {
    NoBid,
    Submitted,
    Selected,
    Rejected,
}

/// Things that happen to a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidEvent {
    /// The factory places its bid
    Place,
    /// The factory edits its pending bid
    Edit,
    /// The client picks this bid
    Select,
    /// The client declines this bid
    Decline,
}

impl BidPhase {
    /// Phase reported by the backend for an existing bid.
    pub fn from_decision(decision: BidDecision) -> Self {
        match decision {
            BidDecision::Pending => BidPhase::Submitted,
            BidDecision::Selected => BidPhase::Selected,
            BidDecision::Rejected => BidPhase::Rejected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BidPhase::NoBid => "no bid",
            BidPhase::Submitted => "submitted",
            BidPhase::Selected => "selected",
            BidPhase::Rejected => "rejected",
        }
    }

    /// Selected and rejected bids are final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BidPhase::Selected | BidPhase::Rejected)
    }

    /// Applies `event`, refusing transitions the lifecycle does not allow.
    ///
    /// ```rust
    /// use stitch_core::bids::{BidEvent, BidPhase};
    ///
    /// let phase = BidPhase::NoBid.apply(BidEvent::Place).unwrap();
    /// assert_eq!(phase, BidPhase::Submitted);
    /// assert!(BidPhase::Selected.apply(BidEvent::Edit).is_err());
    /// ```
    pub fn apply(self, event: BidEvent) -> Result<BidPhase> {
        let next = match (self, event) {
            (BidPhase::NoBid, BidEvent::Place) => BidPhase::Submitted,
            (BidPhase::Submitted, BidEvent::Edit) => BidPhase::Submitted,
            (BidPhase::Submitted, BidEvent::Select) => BidPhase::Selected,
            (BidPhase::Submitted, BidEvent::Decline) => BidPhase::Rejected,
            (from, event) => {
                return Err(MarketError::invalid_input("bid")
                    .with_reason(format!("cannot {event:?} a bid in phase {from:?}").to_lowercase()));
            }
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductInfo;

    fn order(status: OrderStatus, work_price: Option<f64>) -> QuoteOrder {
        QuoteOrder {
            id: 1,
            order_id: 2,
            request_order_id: 3,
            quantity: Some(100),
            product_info: ProductInfo::default(),
            status,
            work_price,
            created_at: None,
        }
    }

    const ALL_STATUSES: [OrderStatus; 11] = [
        OrderStatus::Pending,
        OrderStatus::SamplePending,
        OrderStatus::SampleMatched,
        OrderStatus::ProductPending,
        OrderStatus::ProductMatched,
        OrderStatus::Finished,
        OrderStatus::Responded,
        OrderStatus::Confirmed,
        OrderStatus::Accepted,
        OrderStatus::Rejected,
        OrderStatus::Unknown,
    ];

    #[test]
    fn test_gates_are_mutually_exclusive() {
        for status in ALL_STATUSES {
            for price in [None, Some(0.0), Some(-5.0), Some(12000.0)] {
                let order = order(status, price);
                assert!(
                    !(can_submit_bid(&order) && can_edit_bid(&order)),
                    "both gates open for {status:?} / {price:?}"
                );
            }
        }
    }

    #[test]
    fn test_pending_without_price_can_be_bid_on() {
        assert!(can_submit_bid(&order(OrderStatus::Pending, None)));
        assert!(can_submit_bid(&order(OrderStatus::SamplePending, Some(0.0))));
        assert!(!can_submit_bid(&order(OrderStatus::Finished, None)));
        assert!(!can_submit_bid(&order(OrderStatus::Pending, Some(9000.0))));
    }

    #[test]
    fn test_priced_order_can_be_edited() {
        assert!(can_edit_bid(&order(OrderStatus::Responded, Some(9000.0))));
        assert!(can_edit_bid(&order(OrderStatus::ProductPending, Some(9000.0))));
        assert!(!can_edit_bid(&order(OrderStatus::Responded, None)));
        assert!(!can_edit_bid(&order(OrderStatus::Pending, Some(9000.0))));
    }

    #[test]
    fn test_next_action() {
        assert_eq!(next_action(&order(OrderStatus::Pending, None)), BidAction::Submit);
        assert_eq!(next_action(&order(OrderStatus::Confirmed, Some(1.0))), BidAction::Edit);
        assert_eq!(next_action(&order(OrderStatus::Accepted, Some(1.0))), BidAction::ViewOnly);
    }

    #[test]
    fn test_phase_transitions() {
        let submitted = BidPhase::NoBid.apply(BidEvent::Place).unwrap();
        assert_eq!(submitted.apply(BidEvent::Edit).unwrap(), BidPhase::Submitted);
        assert_eq!(submitted.apply(BidEvent::Select).unwrap(), BidPhase::Selected);
        assert_eq!(submitted.apply(BidEvent::Decline).unwrap(), BidPhase::Rejected);

        assert!(BidPhase::NoBid.apply(BidEvent::Edit).is_err());
        assert!(submitted.apply(BidEvent::Place).is_err());
        for terminal in [BidPhase::Selected, BidPhase::Rejected] {
            assert!(terminal.is_terminal());
            for event in [BidEvent::Place, BidEvent::Edit, BidEvent::Select, BidEvent::Decline] {
                assert!(terminal.apply(event).is_err());
            }
        }
    }

    #[test]
    fn test_phase_from_decision() {
        assert_eq!(BidPhase::from_decision(BidDecision::Pending), BidPhase::Submitted);
        assert_eq!(BidPhase::from_decision(BidDecision::Selected), BidPhase::Selected);
    }
}
