//! Step units for date-time spinners.
//!
//! A [`StepUnit`] is the granularity by which a spinner's value advances or
//! retreats by exactly one step. Calendar units (months and longer) delegate
//! to chrono's month arithmetic, which clamps to the last valid day of the
//! target month; fixed-length units add a [`TimeDelta`].

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::SpinnerError;

/// The granularity used to compute "+1 unit" and "-1 unit".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StepUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    /// Twelve hours.
    HalfDays,
    #[default]
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
}

impl StepUnit {
    /// Every unit, from finest to coarsest.
    pub const ALL: [StepUnit; 14] = [
        StepUnit::Nanos,
        StepUnit::Micros,
        StepUnit::Millis,
        StepUnit::Seconds,
        StepUnit::Minutes,
        StepUnit::Hours,
        StepUnit::HalfDays,
        StepUnit::Days,
        StepUnit::Weeks,
        StepUnit::Months,
        StepUnit::Years,
        StepUnit::Decades,
        StepUnit::Centuries,
        StepUnit::Millennia,
    ];

    /// The lower-case name used by `Display`, `FromStr` and serde.
    pub fn name(self) -> &'static str {
        match self {
            StepUnit::Nanos => "nanos",
            StepUnit::Micros => "micros",
            StepUnit::Millis => "millis",
            StepUnit::Seconds => "seconds",
            StepUnit::Minutes => "minutes",
            StepUnit::Hours => "hours",
            StepUnit::HalfDays => "halfdays",
            StepUnit::Days => "days",
            StepUnit::Weeks => "weeks",
            StepUnit::Months => "months",
            StepUnit::Years => "years",
            StepUnit::Decades => "decades",
            StepUnit::Centuries => "centuries",
            StepUnit::Millennia => "millennia",
        }
    }

    /// Whether one step of this unit is a whole number of days.
    pub fn is_date_based(self) -> bool {
        self >= StepUnit::Days
    }

    /// Whether one step of this unit is shorter than a day.
    pub fn is_time_based(self) -> bool {
        !self.is_date_based()
    }

    /// The exact length of one step, for units that have one.
    ///
    /// Returns `None` for calendar units whose length depends on the date.
    pub fn fixed_duration(self) -> Option<TimeDelta> {
        match self {
            StepUnit::Nanos => Some(TimeDelta::nanoseconds(1)),
            StepUnit::Micros => Some(TimeDelta::microseconds(1)),
            StepUnit::Millis => TimeDelta::try_milliseconds(1),
            StepUnit::Seconds => TimeDelta::try_seconds(1),
            StepUnit::Minutes => TimeDelta::try_minutes(1),
            StepUnit::Hours => TimeDelta::try_hours(1),
            StepUnit::HalfDays => TimeDelta::try_hours(12),
            StepUnit::Days => TimeDelta::try_days(1),
            StepUnit::Weeks => TimeDelta::try_weeks(1),
            _ => None,
        }
    }

    /// The number of calendar months in one step, for calendar units.
    pub fn calendar_months(self) -> Option<u32> {
        match self {
            StepUnit::Months => Some(1),
            StepUnit::Years => Some(12),
            StepUnit::Decades => Some(120),
            StepUnit::Centuries => Some(1_200),
            StepUnit::Millennia => Some(12_000),
            _ => None,
        }
    }

    /// Add one unit to `value`.
    ///
    /// Returns `None` if the result is outside chrono's representable range.
    pub fn add_to(self, value: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.calendar_months() {
            Some(months) => value.checked_add_months(Months::new(months)),
            None => value.checked_add_signed(self.fixed_duration()?),
        }
    }

    /// Subtract one unit from `value`.
    ///
    /// Returns `None` if the result is outside chrono's representable range.
    pub fn subtract_from(self, value: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.calendar_months() {
            Some(months) => value.checked_sub_months(Months::new(months)),
            None => value.checked_sub_signed(self.fixed_duration()?),
        }
    }
}

impl fmt::Display for StepUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepUnit {
    type Err = SpinnerError;

    /// Accepts the plural names used by `Display`, their singular forms and
    /// any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        StepUnit::ALL
            .into_iter()
            .find(|unit| {
                let name = unit.name();
                lower == name || singular(name) == lower
            })
            .ok_or_else(|| SpinnerError::invalid_argument(format!("unknown step unit '{s}'")))
    }
}

impl TryFrom<String> for StepUnit {
    type Error = SpinnerError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

fn singular(name: &str) -> &str {
    match name {
        "centuries" => "century",
        "millennia" => "millennium",
        _ => name.strip_suffix('s').unwrap_or(name),
    }
}
