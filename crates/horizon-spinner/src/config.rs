//! TOML configuration for spinners.
//!
//! ```toml
//! pattern = "dd.MM.yyyy HH:mm"
//! unit = "hours"
//! value = "2024-03-05T09:30:00"
//! minimum = "01.01.2024 00:00"
//! ```
//!
//! Every key is optional. Date-time strings may be ISO-8601 or follow the
//! configured pattern.

use std::sync::Arc;

use chrono::NaiveDateTime;
use horizon_spinner_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::editor::DateTimeEditor;
use crate::error::{Result, SpinnerError};
use crate::format::{DEFAULT_PATTERN, DateTimeFormatter};
use crate::model::DateTimeSpinModel;
use crate::unit::StepUnit;

/// Declarative description of a spinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Canonical display pattern.
    pub pattern: String,
    /// Step unit.
    pub unit: StepUnit,
    /// Initial value. The current local time when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            unit: StepUnit::default(),
            value: None,
            minimum: None,
            maximum: None,
        }
    }
}

impl SpinnerConfig {
    /// Read a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(target: targets::CONFIG, pattern = %config.pattern, unit = %config.unit, "loaded spinner config");
        Ok(config)
    }

    /// Render the configuration as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| SpinnerError::Config(err.to_string()))
    }

    /// Build the formatter for the configured pattern.
    pub fn formatter(&self) -> Result<DateTimeFormatter> {
        DateTimeFormatter::new(&self.pattern)
    }

    /// Build the model described by this configuration.
    pub fn model(&self) -> Result<DateTimeSpinModel> {
        self.model_with(&self.formatter()?)
    }

    /// Build an editor over the configured model and formatter.
    pub fn editor(&self) -> Result<DateTimeEditor> {
        let formatter = self.formatter()?;
        let model = self.model_with(&formatter)?;
        Ok(DateTimeEditor::new(model, Arc::new(formatter)))
    }

    fn model_with(&self, formatter: &DateTimeFormatter) -> Result<DateTimeSpinModel> {
        let read = |field: &str, text: &Option<String>| -> Result<Option<NaiveDateTime>> {
            text.as_deref()
                .map(|text| {
                    formatter.parse(text).map_err(|err| {
                        SpinnerError::Config(format!("{field}: {err}"))
                    })
                })
                .transpose()
        };

        let minimum = read("minimum", &self.minimum)?;
        let maximum = read("maximum", &self.maximum)?;
        let value = match read("value", &self.value)? {
            Some(value) => value,
            None => DateTimeSpinModel::now().value(),
        };
        DateTimeSpinModel::new(value, minimum, maximum, self.unit)
    }
}
