//! Headless text-editor glue for a date-time spin model.
//!
//! [`DateTimeEditor`] keeps a text buffer in sync with a
//! [`DateTimeSpinModel`]: model changes re-render the text, and committed
//! text is parsed back into the model. Rendering, focus and keyboard
//! handling belong to the host toolkit.

use std::sync::Arc;

use chrono::NaiveDateTime;
use horizon_spinner_core::ConnectionGuard;
use horizon_spinner_core::logging::targets;
use parking_lot::Mutex;

use crate::error::Result;
use crate::format::DateTimeFormatter;
use crate::model::DateTimeSpinModel;
use crate::spin_model::SpinModel;

/// Couples a [`DateTimeSpinModel`] with a [`DateTimeFormatter`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use horizon_spinner::{DateTimeEditor, DateTimeSpinModel};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let mut editor =
///     DateTimeEditor::with_pattern(DateTimeSpinModel::with_value(start), "MM/dd/yyyy HH:mm").unwrap();
/// assert_eq!(editor.text(), "03/05/2024 09:30");
///
/// editor.step_up();
/// assert_eq!(editor.text(), "03/06/2024 09:30");
/// ```
pub struct DateTimeEditor {
    model: DateTimeSpinModel,
    formatter: Arc<DateTimeFormatter>,
    text: Arc<Mutex<String>>,
    _subscription: ConnectionGuard<NaiveDateTime>,
}

impl DateTimeEditor {
    /// Attach an editor to `model`.
    ///
    /// The editor subscribes to the model's `value_changed` signal for as
    /// long as it lives.
    pub fn new(model: DateTimeSpinModel, formatter: Arc<DateTimeFormatter>) -> Self {
        let text = Arc::new(Mutex::new(formatter.format(Some(model.value()))));

        let subscription = {
            let text = Arc::clone(&text);
            let formatter = Arc::clone(&formatter);
            model.value_changed.connect_scoped(move |value| {
                *text.lock() = formatter.format(Some(*value));
            })
        };

        Self {
            model,
            formatter,
            text,
            _subscription: subscription,
        }
    }

    /// Attach an editor to `model` using a new formatter for `pattern`.
    pub fn with_pattern(model: DateTimeSpinModel, pattern: &str) -> Result<Self> {
        Ok(Self::new(model, Arc::new(DateTimeFormatter::new(pattern)?)))
    }

    /// The text currently shown.
    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    /// Replace the text buffer without touching the model.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self.text.lock() = text.into();
    }

    /// Parse the text buffer into the model.
    ///
    /// On success the text is rendered back in canonical form and the
    /// return value tells whether the model changed. On a parse error the
    /// model is left alone, the text reverts to the current value and the
    /// error is returned.
    pub fn commit(&mut self) -> Result<bool> {
        let text = self.text();
        match self.formatter.parse(&text) {
            Ok(value) => {
                let changed = self.model.try_set_value(Some(value))?;
                self.refresh_text();
                Ok(changed)
            }
            Err(err) => {
                tracing::debug!(target: targets::EDITOR, %err, "reverting rejected text");
                self.refresh_text();
                Err(err)
            }
        }
    }

    /// Suggested width in characters: the longer of the formatted minimum
    /// and maximum.
    ///
    /// `None` when the model has no bounds.
    pub fn columns(&self) -> Option<usize> {
        [self.model.minimum(), self.model.maximum()]
            .into_iter()
            .flatten()
            .map(|bound| self.formatter.format(Some(bound)).chars().count())
            .max()
    }

    /// Step the model up by one unit. Returns whether the value changed.
    pub fn step_up(&mut self) -> bool {
        self.model.step_up()
    }

    /// Step the model down by one unit. Returns whether the value changed.
    pub fn step_down(&mut self) -> bool {
        self.model.step_down()
    }

    /// Whether the step-up action should be enabled.
    pub fn can_step_up(&self) -> bool {
        self.model.can_step_up()
    }

    /// Whether the step-down action should be enabled.
    pub fn can_step_down(&self) -> bool {
        self.model.can_step_down()
    }

    pub fn model(&self) -> &DateTimeSpinModel {
        &self.model
    }

    /// Mutable access to the model. Value changes still reach the text.
    pub fn model_mut(&mut self) -> &mut DateTimeSpinModel {
        &mut self.model
    }

    pub fn formatter(&self) -> &Arc<DateTimeFormatter> {
        &self.formatter
    }

    /// Detach the editor and return its model.
    pub fn into_model(self) -> DateTimeSpinModel {
        self.model
    }

    fn refresh_text(&mut self) {
        *self.text.lock() = self.formatter.format(Some(self.model.value()));
    }
}

impl std::fmt::Debug for DateTimeEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimeEditor")
            .field("model", &self.model)
            .field("pattern", &self.formatter.pattern())
            .field("text", &*self.text.lock())
            .finish()
    }
}

static_assertions::assert_impl_all!(DateTimeEditor: Send, Sync);
