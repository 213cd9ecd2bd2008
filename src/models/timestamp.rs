//! Lenient parsing for the date-time strings the FoodieHub API emits.
//!
//! Jackson serializes `LocalDateTime` without an offset
//! (`2024-03-15T10:20:30.123`), which is read as wall-clock time on this host.
//! RFC 3339 strings with an offset are converted to the host's local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parse a FoodieHub date string into host-local wall-clock time.
///
/// Returns `None` for anything unrecognised rather than failing.
pub fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Serde adapter: accepts a string, `null`, or any other JSON value, and never
/// rejects the surrounding record because of a bad date.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_local(&s),
        _ => None,
    })
}
