use crate::{
    models::{epoch_millis, QuoteOrder},
    params::SortKey,
};

/// Sorts orders in place, newest / largest first.
///
/// The sort is stable, so orders with equal keys keep their relative order.
/// Missing or unparseable dates count as the epoch and missing quantities as
/// zero, which puts them last.
pub fn sort_orders<T: AsRef<QuoteOrder>>(orders: &mut [T], key: SortKey) {
    orders.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        match key {
            SortKey::Default => {
                epoch_millis(b.created_at.as_deref()).cmp(&epoch_millis(a.created_at.as_deref()))
            }
            SortKey::Quantity => b.quantity.unwrap_or(0).cmp(&a.quantity.unwrap_or(0)),
            SortKey::DueDate => epoch_millis(b.product_info.due_date.as_deref())
                .cmp(&epoch_millis(a.product_info.due_date.as_deref())),
        }
    });
}
