//! Bounded, steppable date-time model.

use chrono::{Local, NaiveDateTime};
use horizon_spinner_core::Signal;
use horizon_spinner_core::logging::targets;

use crate::error::{Result, SpinnerError};
use crate::spin_model::SpinModel;
use crate::unit::StepUnit;

/// A date-time value with optional inclusive bounds and a step unit.
///
/// The model answers "what is one unit up?" and "what is one unit down?"
/// without changing itself; applying a step is the caller's decision (see
/// [`SpinModel::step_up`]).
///
/// The bounds invariant `minimum <= value <= maximum` is only checked when
/// the model is built. [`set_value`](Self::set_value) and the bound and unit
/// setters are permissive: they never clamp and never reject.
///
/// # Signals
///
/// - `value_changed(NaiveDateTime)`: Emitted once for every accepted change
///   of the current value, before the setter returns.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use horizon_spinner::{DateTimeSpinModel, StepUnit};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let model = DateTimeSpinModel::new(start, None, None, StepUnit::Months).unwrap();
///
/// let next = model.next_value().unwrap();
/// assert_eq!(next.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub struct DateTimeSpinModel {
    value: NaiveDateTime,
    minimum: Option<NaiveDateTime>,
    maximum: Option<NaiveDateTime>,
    unit: StepUnit,

    /// Signal emitted when the current value changes.
    pub value_changed: Signal<NaiveDateTime>,
}

impl DateTimeSpinModel {
    /// Create a model, checking that `initial` lies within the bounds.
    ///
    /// An absent bound leaves that side unconstrained.
    pub fn new(
        initial: NaiveDateTime,
        minimum: Option<NaiveDateTime>,
        maximum: Option<NaiveDateTime>,
        unit: StepUnit,
    ) -> Result<Self> {
        if let Some(min) = minimum
            && initial < min
        {
            return Err(SpinnerError::invalid_argument(format!(
                "initial value {initial} is before the minimum {min}"
            )));
        }
        if let Some(max) = maximum
            && initial > max
        {
            return Err(SpinnerError::invalid_argument(format!(
                "initial value {initial} is after the maximum {max}"
            )));
        }

        Ok(Self {
            value: initial,
            minimum,
            maximum,
            unit,
            value_changed: Signal::new(),
        })
    }

    /// Create an unbounded model stepping by days.
    pub fn with_value(initial: NaiveDateTime) -> Self {
        Self {
            value: initial,
            minimum: None,
            maximum: None,
            unit: StepUnit::Days,
            value_changed: Signal::new(),
        }
    }

    /// Create an unbounded model at the current local time, stepping by days.
    pub fn now() -> Self {
        Self::with_value(Local::now().naive_local())
    }

    /// Start building a model.
    pub fn builder() -> DateTimeSpinModelBuilder {
        DateTimeSpinModelBuilder::default()
    }

    /// Set the minimum using builder pattern. Does not validate.
    pub fn with_minimum(mut self, minimum: Option<NaiveDateTime>) -> Self {
        self.minimum = minimum;
        self
    }

    /// Set the maximum using builder pattern. Does not validate.
    pub fn with_maximum(mut self, maximum: Option<NaiveDateTime>) -> Self {
        self.maximum = maximum;
        self
    }

    /// Set the step unit using builder pattern.
    pub fn with_unit(mut self, unit: StepUnit) -> Self {
        self.unit = unit;
        self
    }

    /// The current value.
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// Replace the current value.
    ///
    /// Returns `false` without notifying when `value` equals the current
    /// value. Otherwise stores it, emits `value_changed` once and returns
    /// `true`. Bounds are not enforced.
    pub fn set_value(&mut self, value: NaiveDateTime) -> bool {
        if self.value == value {
            return false;
        }
        let old = std::mem::replace(&mut self.value, value);
        tracing::debug!(target: targets::MODEL, %old, new = %value, "value changed");
        self.value_changed.emit(value);
        true
    }

    /// Replace the current value from an optional input.
    ///
    /// This is the entry used by text glue, where "no value" is possible.
    /// `None` fails with [`SpinnerError::InvalidArgument`].
    pub fn try_set_value(&mut self, value: Option<NaiveDateTime>) -> Result<bool> {
        match value {
            Some(value) => Ok(self.set_value(value)),
            None => Err(SpinnerError::invalid_argument("value must not be empty")),
        }
    }

    /// The inclusive lower bound, if any.
    pub fn minimum(&self) -> Option<NaiveDateTime> {
        self.minimum
    }

    /// Replace the lower bound. The current value is not re-checked.
    pub fn set_minimum(&mut self, minimum: Option<NaiveDateTime>) {
        tracing::debug!(target: targets::MODEL, ?minimum, "minimum replaced");
        self.minimum = minimum;
    }

    /// The inclusive upper bound, if any.
    pub fn maximum(&self) -> Option<NaiveDateTime> {
        self.maximum
    }

    /// Replace the upper bound. The current value is not re-checked.
    pub fn set_maximum(&mut self, maximum: Option<NaiveDateTime>) {
        tracing::debug!(target: targets::MODEL, ?maximum, "maximum replaced");
        self.maximum = maximum;
    }

    /// The step unit.
    pub fn unit(&self) -> StepUnit {
        self.unit
    }

    /// Replace the step unit.
    pub fn set_unit(&mut self, unit: StepUnit) {
        tracing::debug!(target: targets::MODEL, %unit, "step unit replaced");
        self.unit = unit;
    }

    /// The current value plus one unit, if that stays at or below the maximum.
    ///
    /// Also `None` when the sum is not representable.
    pub fn next_value(&self) -> Option<NaiveDateTime> {
        let candidate = self.unit.add_to(self.value)?;
        match self.maximum {
            Some(max) if candidate > max => None,
            _ => Some(candidate),
        }
    }

    /// The current value minus one unit, if that stays at or above the minimum.
    ///
    /// Also `None` when the difference is not representable.
    pub fn previous_value(&self) -> Option<NaiveDateTime> {
        let candidate = self.unit.subtract_from(self.value)?;
        match self.minimum {
            Some(min) if candidate < min => None,
            _ => Some(candidate),
        }
    }

    /// Whether `value` lies within the current bounds.
    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.minimum.is_none_or(|min| value >= min) && self.maximum.is_none_or(|max| value <= max)
    }

    /// Whether the current value lies within the current bounds.
    ///
    /// Can be `false` after a permissive `set_value` or bound change.
    pub fn is_within_bounds(&self) -> bool {
        self.contains(self.value)
    }

    /// Whether stepping up would produce a value.
    pub fn can_step_up(&self) -> bool {
        self.next_value().is_some()
    }

    /// Whether stepping down would produce a value.
    pub fn can_step_down(&self) -> bool {
        self.previous_value().is_some()
    }
}

impl Default for DateTimeSpinModel {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Debug for DateTimeSpinModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimeSpinModel")
            .field("value", &self.value)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("unit", &self.unit)
            .field("value_changed", &self.value_changed)
            .finish()
    }
}

impl SpinModel for DateTimeSpinModel {
    type Value = NaiveDateTime;

    fn value(&self) -> NaiveDateTime {
        DateTimeSpinModel::value(self)
    }

    fn set_value(&mut self, value: NaiveDateTime) -> bool {
        DateTimeSpinModel::set_value(self, value)
    }

    fn next_value(&self) -> Option<NaiveDateTime> {
        DateTimeSpinModel::next_value(self)
    }

    fn previous_value(&self) -> Option<NaiveDateTime> {
        DateTimeSpinModel::previous_value(self)
    }

    fn value_changed(&self) -> &Signal<NaiveDateTime> {
        &self.value_changed
    }
}

/// Builder for [`DateTimeSpinModel`].
///
/// Unlike [`DateTimeSpinModel::new`], the value and the unit may be left
/// out; [`build`](Self::build) then fails.
#[derive(Debug, Clone, Default)]
pub struct DateTimeSpinModelBuilder {
    value: Option<NaiveDateTime>,
    minimum: Option<NaiveDateTime>,
    maximum: Option<NaiveDateTime>,
    unit: Option<StepUnit>,
}

impl DateTimeSpinModelBuilder {
    /// Set the initial value.
    pub fn value(mut self, value: NaiveDateTime) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the lower bound.
    pub fn minimum(mut self, minimum: NaiveDateTime) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the upper bound.
    pub fn maximum(mut self, maximum: NaiveDateTime) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set the step unit.
    pub fn unit(mut self, unit: StepUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Build the model.
    ///
    /// Fails with [`SpinnerError::InvalidArgument`] when the value or the
    /// unit is missing, or when the value lies outside the bounds.
    pub fn build(self) -> Result<DateTimeSpinModel> {
        let value = self
            .value
            .ok_or_else(|| SpinnerError::invalid_argument("initial value is not set"))?;
        let unit = self
            .unit
            .ok_or_else(|| SpinnerError::invalid_argument("step unit is not set"))?;
        DateTimeSpinModel::new(value, self.minimum, self.maximum, unit)
    }
}

static_assertions::assert_impl_all!(DateTimeSpinModel: Send, Sync);
