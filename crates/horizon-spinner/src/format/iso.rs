//! ISO-8601 combined date-time input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Local date-time shapes, tried in order. `%.f` also matches no fraction.
const LOCAL_SPECS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Interpret `text` as an ISO-8601 date-time or date.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fraction]]`, the same with a trailing
/// offset (`Z`, `+01:00`; the local wall time is kept and the offset dropped)
/// and a bare `YYYY-MM-DD`, which maps to midnight.
pub fn parse_iso8601(text: &str) -> Option<NaiveDateTime> {
    LOCAL_SPECS
        .iter()
        .find_map(|spec| NaiveDateTime::parse_from_str(text, spec).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Render `value` in ISO-8601 local form, `YYYY-MM-DDTHH:MM:SS[.fraction]`.
pub fn to_iso8601(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
