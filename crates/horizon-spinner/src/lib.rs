//! Bounded, steppable date-time spinners.
//!
//! A spinner is a value that can be moved up or down by one unit of time
//! while staying within optional bounds, plus the text conversion needed to
//! show and edit it.
//!
//! - [`DateTimeSpinModel`]: the current value, its bounds and step unit, and
//!   a `value_changed` signal.
//! - [`DateTimeFormatter`]: renders values with one canonical pattern and
//!   parses full date-time, date-only and ISO-8601 text.
//! - [`DateTimeEditor`]: keeps a text buffer in sync with a model.
//! - [`SpinnerConfig`]: builds all of the above from TOML.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horizon_spinner::{DateTimeFormatter, DateTimeSpinModel, SpinModel, StepUnit};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let mut model = DateTimeSpinModel::new(start, None, None, StepUnit::Months).unwrap();
//! let formatter = DateTimeFormatter::new("yyyy-MM-dd HH:mm").unwrap();
//!
//! model.value_changed.connect(|value| println!("now {value}"));
//! model.step_up();
//!
//! assert_eq!(formatter.format(Some(model.value())), "2024-02-29 08:00");
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod model;
pub mod spin_model;
pub mod unit;

pub use config::SpinnerConfig;
pub use editor::DateTimeEditor;
pub use error::{Result, SpinnerError};
pub use format::{DEFAULT_PATTERN, DateTimeFormatter, DisplayFormat, parse_iso8601, to_iso8601};
pub use model::{DateTimeSpinModel, DateTimeSpinModelBuilder};
pub use spin_model::SpinModel;
pub use unit::StepUnit;

pub use horizon_spinner_core::{ConnectionGuard, ConnectionId, Signal};
