//! Published-date formatting.

use chrono::{DateTime, NaiveDate, Utc};

/// Formats an upstream timestamp as "March 3, 2021" in UTC.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates. Anything else is
/// returned unchanged.
pub fn format_published_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc).format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    raw.to_string()
}
