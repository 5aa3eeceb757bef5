//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::{draft::FieldProblem, models::AnnotatedOrder};

/// Newtype wrapper for displaying the annotated quote list.
///
/// # Examples
///
/// ```rust
/// use stitch_core::display::QuoteOrders;
///
/// let empty = QuoteOrders(vec![]);
/// assert_eq!(empty.to_string(), "No quote orders found.\n");
/// ```
pub struct QuoteOrders(pub Vec<AnnotatedOrder>);

impl QuoteOrders {
    /// True when the factory sees no quote orders at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Orders in list order, which is the sort applied by the bid engine.
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotatedOrder> {
        self.0.iter()
    }
}

impl Index<usize> for QuoteOrders {
    type Output = AnnotatedOrder;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for QuoteOrders {
    type Item = AnnotatedOrder;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuoteOrders {
    type Item = &'a AnnotatedOrder;
    type IntoIter = std::slice::Iter<'a, AnnotatedOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for QuoteOrders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No quote orders found.");
        }
        for order in &self.0 {
            write!(f, "{order}")?;
        }
        Ok(())
    }
}

/// Validation outcome of one wizard step.
///
/// An empty list renders as a single confirmation line, otherwise each
/// problem is listed as `step.field: reason`.
///
/// ```rust
/// use stitch_core::display::FieldProblems;
///
/// let complete = FieldProblems(vec![]);
/// assert!(complete.is_empty());
/// assert_eq!(complete.to_string(), "✓ All required fields are complete.\n");
/// ```
pub struct FieldProblems(pub Vec<FieldProblem>);

impl FieldProblems {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldProblems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "✓ All required fields are complete.");
        }
        writeln!(f, "Missing or invalid fields:")?;
        writeln!(f)?;
        for problem in &self.0 {
            writeln!(f, "- {problem}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draft::validation::step_problems,
        models::{Draft, OrderStatus, ProductInfo, QuoteOrder, StepKey},
    };

    fn annotated(order_id: u64, name: &str) -> AnnotatedOrder {
        AnnotatedOrder::checking(QuoteOrder {
            id: order_id,
            order_id,
            request_order_id: order_id + 100,
            quantity: None,
            product_info: ProductInfo {
                name: Some(name.to_string()),
                ..Default::default()
            },
            status: OrderStatus::Pending,
            work_price: None,
            created_at: None,
        })
    }

    #[test]
    fn test_quote_orders_keep_their_order() {
        let orders = QuoteOrders(vec![annotated(1, "First"), annotated(2, "Second")]);
        let output = orders.to_string();
        let first = output.find("First").unwrap();
        let second = output.find("Second").unwrap();
        assert!(first < second);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].order.order_id, 2);
    }

    #[test]
    fn test_field_problems_display() {
        let today = jiff::civil::date(2025, 3, 1);
        let problems = FieldProblems(step_problems(StepKey::Schedule, &Draft::default(), today));
        let output = problems.to_string();
        assert!(output.contains("- schedule.total_quantity: required"));

        assert_eq!(
            FieldProblems(vec![]).to_string(),
            "✓ All required fields are complete.\n"
        );
    }
}
