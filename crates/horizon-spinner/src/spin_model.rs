//! The seam between spin models and the widgets that drive them.

use horizon_spinner_core::Signal;

/// A value that can be read, replaced and stepped by one unit.
///
/// Widgets talk to their model only through this trait: read and write the
/// current value, ask for the neighbouring values, and subscribe to change
/// notifications.
pub trait SpinModel {
    /// The value type held by the model.
    type Value: Clone + PartialEq + Send + Sync + 'static;

    /// The current value.
    fn value(&self) -> Self::Value;

    /// Replace the current value, notifying observers if it changed.
    ///
    /// Returns whether the value changed.
    fn set_value(&mut self, value: Self::Value) -> bool;

    /// The value one step up, or `None` if stepping up is not allowed.
    fn next_value(&self) -> Option<Self::Value>;

    /// The value one step down, or `None` if stepping down is not allowed.
    fn previous_value(&self) -> Option<Self::Value>;

    /// Signal emitted when the current value changes.
    fn value_changed(&self) -> &Signal<Self::Value>;

    /// Move one step up.
    ///
    /// Does nothing and returns `false` when there is no next value.
    fn step_up(&mut self) -> bool {
        match self.next_value() {
            Some(next) => self.set_value(next),
            None => false,
        }
    }

    /// Move one step down.
    ///
    /// Does nothing and returns `false` when there is no previous value.
    fn step_down(&mut self) -> bool {
        match self.previous_value() {
            Some(previous) => self.set_value(previous),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Integer counter limited to 0..=limit.
    struct Counter {
        value: i32,
        limit: i32,
        value_changed: Signal<i32>,
    }

    impl SpinModel for Counter {
        type Value = i32;

        fn value(&self) -> i32 {
            self.value
        }

        fn set_value(&mut self, value: i32) -> bool {
            if self.value == value {
                return false;
            }
            self.value = value;
            self.value_changed.emit(value);
            true
        }

        fn next_value(&self) -> Option<i32> {
            (self.value < self.limit).then_some(self.value + 1)
        }

        fn previous_value(&self) -> Option<i32> {
            (self.value > 0).then_some(self.value - 1)
        }

        fn value_changed(&self) -> &Signal<i32> {
            &self.value_changed
        }
    }

    #[test]
    fn test_step_up_and_down() {
        let mut counter = Counter {
            value: 0,
            limit: 1,
            value_changed: Signal::new(),
        };
        assert!(!counter.step_down());
        assert!(counter.step_up());
        assert_eq!(counter.value(), 1);
        assert!(!counter.step_up());
        assert!(counter.step_down());
        assert_eq!(counter.value(), 0);
    }
}
