//! Forgiving decoders for backend values.
//!
//! The backend serializes decimals as strings ("15000.00"), sometimes sends
//! quantities as text, and dates in several shapes. A single odd row must not
//! fail the whole list, so anything unparseable decodes to `None`.

use jiff::{civil, tz::TimeZone, Timestamp};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    fn to_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Int(n) => Some(*n as f64),
            RawNumber::Float(n) => Some(*n),
            RawNumber::Text(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        }
    }
}

/// Decodes an optional number that may arrive as a JSON number or string.
pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(RawNumber::to_f64)
        .filter(|n| n.is_finite()))
}

/// Decodes an optional non-negative integer that may arrive as a number or
/// string. Negative and fractional values are rejected to `None`.
pub(crate) fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(RawNumber::to_f64)
        .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as u64))
}

/// Parses a backend date or date-time string into an instant.
///
/// Accepts RFC 3339 timestamps, naive date-times and plain dates; naive
/// values are read as UTC.
///
/// # Examples
///
/// ```rust
/// use stitch_core::models::parse_instant;
///
/// assert!(parse_instant("2024-01-01").is_some());
/// assert!(parse_instant("2024-01-01T09:30:00Z").is_some());
/// assert!(parse_instant("not a date").is_none());
/// ```
pub fn parse_instant(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = value.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = value.parse::<civil::DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    value
        .parse::<civil::Date>()
        .ok()
        .and_then(|d| d.to_zoned(TimeZone::UTC).ok())
        .map(|z| z.timestamp())
}

/// Milliseconds since the epoch, with missing or unparseable values mapped
/// to zero so they sort after every real date in descending order.
pub(crate) fn epoch_millis(value: Option<&str>) -> i64 {
    value
        .and_then(parse_instant)
        .map(|ts| ts.as_millisecond())
        .unwrap_or(0)
}
