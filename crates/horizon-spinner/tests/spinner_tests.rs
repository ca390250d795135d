//! Integration tests for the spin model and formatter.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use horizon_spinner::{DateTimeFormatter, DateTimeSpinModel, SpinModel, SpinnerError, StepUnit};
use parking_lot::Mutex;
use std::sync::Arc;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_spinner=debug")
        .with_test_writer()
        .try_init();
}

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn test_bounded_day_stepping_scenario() {
    setup();
    let mut model = DateTimeSpinModel::new(
        dt(2024, 1, 2, 0, 0),
        Some(dt(2024, 1, 1, 0, 0)),
        Some(dt(2024, 1, 3, 0, 0)),
        StepUnit::Days,
    )
    .unwrap();

    assert_eq!(model.next_value(), Some(dt(2024, 1, 3, 0, 0)));

    model.set_value(dt(2024, 1, 3, 0, 0));
    assert_eq!(model.next_value(), None);

    model.set_value(dt(2024, 1, 1, 0, 0));
    assert_eq!(model.previous_value(), None);
}

#[test]
fn test_canonical_pattern_scenario() {
    setup();
    let formatter = DateTimeFormatter::new("MM/dd/yyyy HH:mm").unwrap();

    assert_eq!(formatter.format(Some(dt(2024, 3, 5, 9, 30))), "03/05/2024 09:30");
    assert_eq!(formatter.parse("03/05/2024 09:30").unwrap(), dt(2024, 3, 5, 9, 30));
    assert_eq!(formatter.parse("03/05/2024").unwrap(), dt(2024, 3, 5, 0, 0));
    assert_eq!(formatter.format(None), "");
}

#[test]
fn test_construction_succeeds_within_bounds() {
    let min = dt(2020, 1, 1, 0, 0);
    let max = dt(2030, 1, 1, 0, 0);
    for unit in StepUnit::ALL {
        for initial in [min, dt(2024, 6, 15, 12, 0), max] {
            let model = DateTimeSpinModel::new(initial, Some(min), Some(max), unit).unwrap();
            assert_eq!(model.value(), initial);
            assert_eq!(model.unit(), unit);
        }
    }
}

#[test]
fn test_construction_failures_are_invalid_argument() {
    let min = dt(2020, 1, 1, 0, 0);
    let max = dt(2030, 1, 1, 0, 0);

    let before = DateTimeSpinModel::new(dt(2019, 12, 31, 0, 0), Some(min), Some(max), StepUnit::Days);
    let after = DateTimeSpinModel::new(dt(2030, 1, 1, 0, 1), Some(min), Some(max), StepUnit::Days);
    let no_value = DateTimeSpinModel::builder().unit(StepUnit::Days).build();
    let no_unit = DateTimeSpinModel::builder().value(min).build();

    for result in [before, after, no_value, no_unit] {
        assert!(matches!(result, Err(SpinnerError::InvalidArgument(_))));
    }
}

#[test]
fn test_next_and_previous_are_exactly_one_unit() {
    let start = dt(2024, 1, 31, 8, 0);
    for unit in StepUnit::ALL {
        let model = DateTimeSpinModel::with_value(start).with_unit(unit);
        assert_eq!(model.next_value(), unit.add_to(start), "{unit}");
        assert_eq!(model.previous_value(), unit.subtract_from(start), "{unit}");
    }

    let model = DateTimeSpinModel::with_value(start).with_unit(StepUnit::Months);
    assert_eq!(model.next_value(), Some(dt(2024, 2, 29, 8, 0)));
    assert_eq!(model.previous_value(), Some(dt(2023, 12, 31, 8, 0)));
}

#[test]
fn test_stepping_stops_at_bounds_for_every_unit() {
    let value = dt(2024, 6, 15, 12, 0);
    for unit in StepUnit::ALL {
        let model = DateTimeSpinModel::new(value, Some(value), Some(value), unit).unwrap();
        assert_eq!(model.next_value(), None, "{unit}");
        assert_eq!(model.previous_value(), None, "{unit}");
    }
}

#[test]
fn test_set_value_notifies_exactly_once() {
    setup();
    let mut model = DateTimeSpinModel::with_value(dt(2024, 1, 1, 0, 0));
    let count = Arc::new(Mutex::new(0));
    let counter = count.clone();
    model.value_changed.connect(move |_| *counter.lock() += 1);

    let target = dt(2024, 2, 2, 2, 2);
    assert!(model.set_value(target));
    assert_eq!(model.value(), target);
    assert_eq!(*count.lock(), 1);

    assert!(!model.set_value(target));
    assert_eq!(*count.lock(), 1);
}

#[test]
fn test_step_up_through_trait_notifies_observer() {
    let mut model = DateTimeSpinModel::with_value(dt(2024, 1, 1, 0, 0)).with_unit(StepUnit::Weeks);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _guard = model
        .value_changed()
        .connect_scoped(move |value| sink.lock().push(*value));

    assert!(model.step_up());
    assert!(model.step_up());
    assert!(model.step_down());

    assert_eq!(
        *seen.lock(),
        vec![dt(2024, 1, 8, 0, 0), dt(2024, 1, 15, 0, 0), dt(2024, 1, 8, 0, 0)]
    );
}

#[test]
fn test_round_trip_through_pattern() {
    let formatters = [
        DateTimeFormatter::new("MM/dd/yyyy HH:mm").unwrap(),
        DateTimeFormatter::new("yyyy-MM-dd'T'HH:mm:ss.SSS").unwrap(),
        DateTimeFormatter::new("EEEE, d MMM yyyy h:mm:ss a").unwrap(),
    ];

    let mut value = dt(1999, 12, 31, 23, 0);
    let step = TimeDelta::try_hours(7).unwrap() + TimeDelta::try_minutes(13).unwrap();
    for _ in 0..200 {
        for formatter in &formatters {
            let expected = truncate_to_pattern(formatter, value);
            let text = formatter.format(Some(expected));
            assert_eq!(formatter.parse(&text).unwrap(), expected, "{text}");
        }
        value += step;
    }
}

/// Drop the precision a pattern cannot show.
fn truncate_to_pattern(formatter: &DateTimeFormatter, value: NaiveDateTime) -> NaiveDateTime {
    if formatter.pattern().contains("ss") {
        value
    } else {
        value.with_second(0).unwrap()
    }
}

#[test]
fn test_malformed_text_is_always_parse_error() {
    let formatter = DateTimeFormatter::default();
    for text in ["not-a-date", "", "   ", "13/45/2024 99:99", "03/05", "2024-13-01", "03/05/2024 09:30 extra"] {
        let err = formatter.parse(text).unwrap_err();
        assert!(err.is_parse(), "{text}: {err}");
        assert!(err.offset().unwrap() <= text.chars().count());
    }
}

#[test]
fn test_permissive_bounds_keep_value() {
    let mut model = DateTimeSpinModel::new(
        dt(2024, 1, 2, 0, 0),
        Some(dt(2024, 1, 1, 0, 0)),
        Some(dt(2024, 1, 3, 0, 0)),
        StepUnit::Days,
    )
    .unwrap();

    model.set_maximum(Some(dt(2023, 1, 1, 0, 0)));
    assert_eq!(model.value(), dt(2024, 1, 2, 0, 0));
    assert_eq!(model.next_value(), None);
    assert_eq!(model.previous_value(), None);

    model.set_maximum(None);
    model.set_minimum(None);
    assert!(model.can_step_up());
    assert!(model.can_step_down());
}
