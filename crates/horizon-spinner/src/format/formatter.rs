//! Conversion between date-time values and display text.

use chrono::format::{Item, Parsed, StrftimeItems, parse_and_remainder};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use horizon_spinner_core::logging::targets;

use super::iso::parse_iso8601;
use super::pattern::DisplayFormat;
use crate::error::{Result, SpinnerError};

/// Converts [`NaiveDateTime`] values to and from text with one canonical
/// display pattern.
///
/// Values are always rendered with the canonical pattern. Parsing accepts
/// three shapes, tried in order:
///
/// 1. the full canonical pattern;
/// 2. the date part of the canonical pattern, at midnight;
/// 3. ISO-8601 (`2024-03-05T09:30:00`, `2024-03-05`).
///
/// The formatter holds no mutable state and can be shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use horizon_spinner::DateTimeFormatter;
///
/// let formatter = DateTimeFormatter::new("MM/dd/yyyy HH:mm").unwrap();
/// let value = formatter.parse("03/05/2024").unwrap();
/// assert_eq!(formatter.format(Some(value)), "03/05/2024 00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateTimeFormatter {
    format: DisplayFormat,
}

impl DateTimeFormatter {
    /// Create a formatter for a display pattern such as `"MM/dd/yyyy HH:mm"`.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self::from_format(DisplayFormat::new(pattern)?))
    }

    /// Create a formatter from an already compiled pattern.
    pub fn from_format(format: DisplayFormat) -> Self {
        Self { format }
    }

    /// The compiled canonical pattern.
    pub fn display_format(&self) -> &DisplayFormat {
        &self.format
    }

    /// The canonical pattern text.
    pub fn pattern(&self) -> &str {
        self.format.pattern()
    }

    /// Render a value with the canonical pattern.
    ///
    /// `None` renders as the empty string.
    pub fn format(&self, value: Option<NaiveDateTime>) -> String {
        match value {
            Some(value) => value.format(self.format.full_spec()).to_string(),
            None => String::new(),
        }
    }

    /// Normalize text to the canonical form.
    ///
    /// The text is read as ISO-8601 first and under the canonical pattern
    /// otherwise, then rendered with the canonical pattern.
    pub fn format_text(&self, text: &str) -> Result<String> {
        let value = match parse_iso8601(text.trim()) {
            Some(value) => value,
            None => self.parse_canonical(text)?,
        };
        Ok(self.format(Some(value)))
    }

    /// Parse text into a value.
    ///
    /// On failure the error carries the message and character offset of the
    /// canonical date-only attempt (or of the full attempt when the pattern
    /// has no date part).
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime> {
        match self.parse_canonical(text) {
            Ok(value) => Ok(value),
            Err(err) => match parse_iso8601(text.trim()) {
                Some(value) => {
                    tracing::debug!(target: targets::FORMAT, text, "accepted ISO-8601 input");
                    Ok(value)
                }
                None => Err(err),
            },
        }
    }

    fn parse_canonical(&self, text: &str) -> Result<NaiveDateTime> {
        let trimmed = text.trim();
        let lead = text.len() - text.trim_start().len();

        let full_spec = self.format.full_spec();
        let full_err = match NaiveDateTime::parse_from_str(trimmed, full_spec) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !self.format.has_date_fields() {
            // Time-only patterns land on 1970-01-01.
            return match NaiveTime::parse_from_str(trimmed, full_spec) {
                Ok(time) => Ok(NaiveDate::default().and_time(time)),
                Err(err) => {
                    let offset = lead + matched_chars(trimmed, full_spec);
                    Err(SpinnerError::parse(text, err.to_string(), offset))
                }
            };
        }

        let Some(date_spec) = self.format.date_spec() else {
            let offset = lead + matched_chars(trimmed, full_spec);
            return Err(SpinnerError::parse(text, full_err.to_string(), offset));
        };

        match NaiveDate::parse_from_str(trimmed, date_spec) {
            Ok(date) => {
                tracing::debug!(target: targets::FORMAT, text, "accepted date-only input");
                Ok(date.and_time(NaiveTime::MIN))
            }
            Err(err) => {
                let offset = lead + matched_chars(trimmed, date_spec);
                Err(SpinnerError::parse(text, err.to_string(), offset))
            }
        }
    }
}

/// Number of leading characters of `text` matched by `spec`.
///
/// Grows the item prefix one item at a time and keeps the furthest point
/// reached before an item fails to match.
fn matched_chars(text: &str, spec: &str) -> usize {
    let items: Vec<Item<'_>> = StrftimeItems::new(spec).collect();
    let mut consumed = 0;
    for end in 1..=items.len() {
        let mut parsed = Parsed::new();
        match parse_and_remainder(&mut parsed, text, items[..end].iter()) {
            Ok(rest) => consumed = text.len() - rest.len(),
            Err(_) => break,
        }
    }
    text[..consumed].chars().count()
}

static_assertions::assert_impl_all!(DateTimeFormatter: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn us_formatter() -> DateTimeFormatter {
        DateTimeFormatter::new("MM/dd/yyyy HH:mm").unwrap()
    }

    #[test]
    fn test_format_canonical() {
        let formatter = us_formatter();
        assert_eq!(formatter.format(Some(dt(2024, 3, 5, 9, 30))), "03/05/2024 09:30");
        assert_eq!(formatter.format(None), "");
    }

    #[test]
    fn test_parse_full_and_date_only() {
        let formatter = us_formatter();
        assert_eq!(formatter.parse("03/05/2024 09:30").unwrap(), dt(2024, 3, 5, 9, 30));
        assert_eq!(formatter.parse("03/05/2024").unwrap(), dt(2024, 3, 5, 0, 0));
        assert_eq!(formatter.parse("  03/05/2024 ").unwrap(), dt(2024, 3, 5, 0, 0));
    }

    #[test]
    fn test_parse_accepts_iso() {
        let formatter = us_formatter();
        assert_eq!(formatter.parse("2024-03-05T09:30:00").unwrap(), dt(2024, 3, 5, 9, 30));
        assert_eq!(formatter.parse("2024-03-05").unwrap(), dt(2024, 3, 5, 0, 0));
    }

    #[test]
    fn test_parse_failure_is_parse_error() {
        let formatter = us_formatter();
        let err = formatter.parse("not-a-date").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_parse_failure_offset_points_at_bad_field() {
        let formatter = us_formatter();
        // Month and day match, the year does not.
        let err = formatter.parse("03/05/xx").unwrap_err();
        assert_eq!(err.offset(), Some(6));
        // Leading whitespace counts towards the offset.
        let err = formatter.parse("  03/xx").unwrap_err();
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn test_parse_out_of_range_field() {
        let formatter = us_formatter();
        let err = formatter.parse("13/45/2024").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_date_only_pattern_parses_at_midnight() {
        let formatter = DateTimeFormatter::new("dd.MM.yyyy").unwrap();
        assert_eq!(formatter.parse("05.03.2024").unwrap(), dt(2024, 3, 5, 0, 0));
        assert_eq!(formatter.format(Some(dt(2024, 3, 5, 17, 0))), "05.03.2024");
    }

    #[test]
    fn test_time_only_pattern() {
        let formatter = DateTimeFormatter::new("HH:mm").unwrap();
        assert_eq!(formatter.parse("09:30").unwrap(), dt(1970, 1, 1, 9, 30));
        let err = formatter.parse("09:xx").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_interleaved_pattern_reports_full_attempt() {
        let formatter = DateTimeFormatter::new("yyyy-MM HH:mm dd").unwrap();
        assert_eq!(formatter.parse("2024-03 09:30 05").unwrap(), dt(2024, 3, 5, 9, 30));
        let err = formatter.parse("2024-03 09:30 xx").unwrap_err();
        assert_eq!(err.offset(), Some(14));
    }

    #[test]
    fn test_format_text_normalizes() {
        let formatter = us_formatter();
        assert_eq!(
            formatter.format_text("2024-03-05T09:30:00").unwrap(),
            "03/05/2024 09:30"
        );
        assert_eq!(formatter.format_text("03/05/2024").unwrap(), "03/05/2024 00:00");
        assert!(formatter.format_text("garbage").unwrap_err().is_parse());
    }

    #[test]
    fn test_twelve_hour_round_trip() {
        let formatter = DateTimeFormatter::new("yyyy-MM-dd hh:mm a").unwrap();
        let value = dt(2025, 1, 15, 14, 30);
        let text = formatter.format(Some(value));
        assert_eq!(text, "2025-01-15 02:30 PM");
        assert_eq!(formatter.parse(&text).unwrap(), value);
    }

    #[test]
    fn test_named_month_round_trip() {
        let formatter = DateTimeFormatter::new("dd MMMM yyyy, HH:mm:ss").unwrap();
        let value = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        let text = formatter.format(Some(value));
        assert_eq!(text, "31 December 1999, 23:59:58");
        assert_eq!(formatter.parse(&text).unwrap(), value);
        assert_eq!(
            formatter.parse("31 December 1999").unwrap(),
            dt(1999, 12, 31, 0, 0)
        );
    }

    #[test]
    fn test_default_formatter() {
        let formatter = DateTimeFormatter::default();
        assert_eq!(formatter.pattern(), "MM/dd/yyyy HH:mm");
    }

    #[test]
    fn test_twelve_hour_pattern_round_trips_afternoon() {
        let formatter = DateTimeFormatter::new("yyyy-MM-dd hh:mm AP").unwrap();
        let value = dt(2024, 3, 5, 14, 30);
        assert_eq!(formatter.parse(&formatter.format(Some(value))).unwrap(), value);
        assert!(DateTimeFormatter::new("yyyy-MM-dd hh:mm").is_err());
    }

    #[test]
    fn test_two_digit_year_window() {
        let formatter = DateTimeFormatter::new("dd.MM.yy HH:mm").unwrap();
        let recent = dt(2024, 3, 5, 14, 30);
        assert_eq!(formatter.parse(&formatter.format(Some(recent))).unwrap(), recent);

        let old = dt(1950, 3, 5, 14, 30);
        let text = formatter.format(Some(old));
        assert_eq!(text, "05.03.50 14:30");
        assert_eq!(formatter.parse(&text).unwrap(), dt(2050, 3, 5, 14, 30));
    }
}
