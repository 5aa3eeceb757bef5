//! Delivery estimates and money formatting for bid receipts.

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Delivery estimate used when the form has no date.
pub const DEFAULT_DELIVERY_DAYS: u32 = 7;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days from `now` until the start of `delivery` (UTC), rounded up
/// and never less than one. Without a date the estimate is seven days.
///
/// ```rust
/// use jiff::civil::date;
/// use stitch_core::bids::estimated_delivery_days;
///
/// let now = "2025-03-01T09:00:00Z".parse().unwrap();
/// assert_eq!(estimated_delivery_days(Some(date(2025, 3, 11)), now), 10);
/// assert_eq!(estimated_delivery_days(Some(date(2025, 2, 1)), now), 1);
/// assert_eq!(estimated_delivery_days(None, now), 7);
/// ```
pub fn estimated_delivery_days(delivery: Option<Date>, now: Timestamp) -> u32 {
    let Some(delivery) = delivery else {
        return DEFAULT_DELIVERY_DAYS;
    };
    let Ok(start) = delivery.to_zoned(TimeZone::UTC) else {
        return DEFAULT_DELIVERY_DAYS;
    };

    let millis = start.timestamp().as_millisecond() - now.as_millisecond();
    if millis <= 0 {
        return 1;
    }
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX).max(1)
}

/// Formats an amount in won with thousands separators, rounded to whole won.
///
/// ```rust
/// use stitch_core::bids::format_won;
///
/// assert_eq!(format_won(4_500_000.0), "4,500,000");
/// assert_eq!(format_won(999.6), "1,000");
/// ```
pub fn format_won(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
