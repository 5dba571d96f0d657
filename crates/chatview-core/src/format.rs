//! Display helpers for [`NormalizedMessage::timestamp`](crate::NormalizedMessage).
//!
//! Both functions take the canonical string produced by the normalizer and
//! always return something printable.

use crate::timestamp::parse_canonical;

/// Label used for messages whose timestamp could not be resolved.
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// 12-hour clock time without a leading zero (`9:05 AM`), or `""`.
pub fn format_clock_time(timestamp: &str) -> String {
    parse_canonical(timestamp)
        .map(|dt| dt.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

/// Calendar date as `DD Mon YYYY` (`01 Mar 2024`), or `"Unknown Date"`.
pub fn format_calendar_date(timestamp: &str) -> String {
    parse_canonical(timestamp)
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}
