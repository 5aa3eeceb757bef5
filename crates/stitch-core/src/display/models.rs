//! Display implementations for domain models.
//!
//! Markdown output for the terminal renderer. Model definitions stay free of
//! presentation code.

use std::fmt;

use super::datetime::{DisplayDate, LocalDateTime};
use crate::{
    bids::{format_won, next_action},
    models::{AnnotatedOrder, Bid, BidReceipt, BidStatus, Draft, QuoteOrder, Submission, SubmissionPayload},
};

fn won(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), |a| format!("{} won", format_won(a)))
}

impl QuoteOrder {
    fn fmt_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Status: {}", self.status.label())?;
        match self.quantity {
            Some(quantity) => writeln!(f, "- Quantity: {quantity}")?,
            None => writeln!(f, "- Quantity: -")?,
        }
        writeln!(f, "- Due: {}", DisplayDate(self.product_info.due_date.as_deref()))?;
        writeln!(f, "- Unit price: {}", won(self.recorded_price()))?;
        if let Some(designer) = &self.product_info.designer_name {
            writeln!(f, "- Designer: {designer}")?;
        }
        writeln!(f, "- Request order: {}", self.request_order_id)?;
        writeln!(f, "- Created: {}", DisplayDate(self.created_at.as_deref()))
    }
}

impl fmt::Display for QuoteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (Order: {})", self.display_name(), self.order_id)?;
        writeln!(f)?;
        self.fmt_details(f)?;
        writeln!(f)
    }
}

impl fmt::Display for AnnotatedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (Order: {}) {}",
            self.order.display_name(),
            self.order.order_id,
            self.bid_status.with_icon()
        )?;
        writeln!(f)?;
        self.order.fmt_details(f)?;
        match (self.bid_status, self.bid_id) {
            (BidStatus::Submitted, Some(bid_id)) => writeln!(f, "- Bid: {bid_id}")?,
            (BidStatus::Error, _) => {
                if let Some(error) = &self.lookup_error {
                    writeln!(f, "- Lookup error: {error}")?;
                }
            }
            _ => {}
        }
        writeln!(f, "- Action: {}", next_action(&self.order))?;
        writeln!(f)
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Bid {} on request order {}", self.id, self.order)?;
        writeln!(f)?;
        writeln!(f, "- Decision: {}", self.status)?;
        writeln!(f, "- Unit price: {}", won(self.work_price))?;
        if let Some(days) = self.estimated_delivery_days {
            writeln!(f, "- Delivery: {days} days")?;
        }
        if let Some(name) = self.factory_info.as_ref().and_then(|i| i.name.as_deref()) {
            writeln!(f, "- Factory: {name}")?;
        }
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BidReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bid)?;
        writeln!(f)?;
        writeln!(f, "**Total**: {} won", format_won(self.total_price))?;
        writeln!(f, "**Estimated delivery**: {} days", self.estimated_delivery_days)?;
        writeln!(f, "**Phase**: {}", self.phase().label())
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Product: {}", self.product_id)?;
        writeln!(f, "- Order: {}", self.order_id)?;
        writeln!(f, "- Request order: {}", self.request_order_id)
    }
}

fn field_line(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    if value.trim().is_empty() {
        writeln!(f, "- {label}: _(empty)_")
    } else {
        writeln!(f, "- {label}: {value}")
    }
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Manufacturing draft ({})", self.key)?;
        writeln!(f)?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated_at))?;
        }
        if let Some(submission) = &self.submission {
            writeln!(f, "- Submitted: order {}", submission.order_id)?;
        }

        if self.is_empty() {
            writeln!(f)?;
            return writeln!(f, "Nothing saved yet.");
        }

        if let Some(product) = &self.product {
            writeln!(f, "\n## 1. Product\n")?;
            field_line(f, "Name", &product.name)?;
            field_line(f, "Season", &product.season)?;
            field_line(f, "Target", &product.target_customer_code)?;
            field_line(f, "Concept", &product.concept)?;
        }
        if let Some(design) = &self.design {
            writeln!(f, "\n## 2. Design\n")?;
            writeln!(f, "- Files: {}", design.file_count)?;
            field_line(f, "Points", &design.point_description)?;
        }
        if let Some(materials) = &self.materials {
            writeln!(f, "\n## 3. Materials\n")?;
            field_line(f, "Fabric", &materials.fabric_code)?;
            field_line(f, "Accessory", &materials.accessory_code)?;
        }
        if let Some(schedule) = &self.schedule {
            writeln!(f, "\n## 4. Schedule\n")?;
            match schedule.sample_size {
                Some(size) => writeln!(f, "- Sample size: {size}")?,
                None => field_line(f, "Sample size", "")?,
            }
            match schedule.total_quantity {
                Some(quantity) => writeln!(f, "- Quantity: {quantity}")?,
                None => field_line(f, "Quantity", "")?,
            }
            match schedule.due_date {
                Some(due) => writeln!(f, "- Due date: {due}")?,
                None => field_line(f, "Due date", "")?,
            }
        }
        if let Some(notes) = self.notes.as_ref().filter(|n| !n.text.trim().is_empty()) {
            writeln!(f, "\n## 5. Notes\n")?;
            writeln!(f, "{}", notes.text)?;
        }
        if !self.extra.is_empty() {
            writeln!(f, "\n## Other values\n")?;
            for (key, value) in &self.extra {
                writeln!(f, "- {key}: {value}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SubmissionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Field | Value |")?;
        writeln!(f, "|-------|-------|")?;
        for (name, value) in &self.fields {
            writeln!(f, "| {name} | {} |", value.replace('|', "\\|"))?;
        }
        writeln!(f)?;
        match &self.image {
            Some(image) => writeln!(
                f,
                "Attachment `{}`: {} ({} bytes)",
                Self::IMAGE_FIELD,
                image.file_name,
                image.bytes.len()
            )?,
            None => writeln!(f, "No attachment.")?,
        }
        if self.dropped_files > 0 {
            writeln!(
                f,
                "{} more design file(s) not sent; only one image is accepted.",
                self.dropped_files
            )?;
        }
        Ok(())
    }
}
