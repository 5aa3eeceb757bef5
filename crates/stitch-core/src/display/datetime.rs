//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::models::parse_instant;

/// Formats a `Timestamp` in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
///
/// Used for the draft's last-saved time; output depends on the host's zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats a backend date string as `YYYY-MM-DD` in UTC.
///
/// Missing values print as `-`; values that do not parse are shown as
/// received.
///
/// ```rust
/// use stitch_core::display::DisplayDate;
///
/// assert_eq!(DisplayDate(Some("2025-04-01T15:30:00Z")).to_string(), "2025-04-01");
/// assert_eq!(DisplayDate(Some("next week")).to_string(), "next week");
/// assert_eq!(DisplayDate(None).to_string(), "-");
/// ```
pub struct DisplayDate<'a>(pub Option<&'a str>);

impl fmt::Display for DisplayDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(raw) = self.0.map(str::trim).filter(|s| !s.is_empty()) else {
            return write!(f, "-");
        };
        match parse_instant(raw) {
            Some(ts) => write!(f, "{}", ts.to_zoned(TimeZone::UTC).date()),
            None => write!(f, "{raw}"),
        }
    }
}
