//! Text conversion for date-time values.
//!
//! - [`DisplayFormat`] compiles a display pattern.
//! - [`DateTimeFormatter`] renders and parses values with it.
//! - [`parse_iso8601`] and [`to_iso8601`] handle the machine-readable form.

mod formatter;
mod iso;
mod pattern;

pub use formatter::DateTimeFormatter;
pub use iso::{parse_iso8601, to_iso8601};
pub use pattern::{DEFAULT_PATTERN, DisplayFormat};
