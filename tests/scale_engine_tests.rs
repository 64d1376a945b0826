use approx::assert_abs_diff_eq;
use overview_chart::core::scale_engine::{enabled_bounds, scale_for_max};
use overview_chart::core::{
    ScaleDirection, ScaleEngine, Series, SeriesArena, SeriesKey, ViewWindow,
};
use proptest::prelude::*;

const VISIBLE_HEIGHT: f64 = 300.0;
const FULL: ViewWindow = ViewWindow::new(0.0, 0.0, 1000.0);

fn arena(lines: &[(&str, Vec<f64>)]) -> SeriesArena {
    let mut arena = SeriesArena::new();
    for (key, values) in lines {
        let line = Series::new(SeriesKey::new(*key), *key, "#000", values.clone())
            .expect("valid series");
        arena.insert(SeriesKey::new(*key), line);
    }
    arena
}

fn two_lines() -> SeriesArena {
    arena(&[
        ("a", vec![20.0, 100.0, 40.0, 60.0]),
        ("b", vec![50.0, 10.0, 30.0, 25.0]),
    ])
}

fn set_disabled(series: &mut SeriesArena, key: &str, disabled: bool) {
    series
        .get_mut(&SeriesKey::new(key))
        .expect("series present")
        .set_disabled(disabled);
}

#[test]
fn first_computation_has_no_direction() {
    let series = two_lines();
    let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);

    let state = engine.compute_scale(FULL, &series, 4);
    assert_eq!(state.scale, 3.0);
    assert_eq!(state.direction, ScaleDirection::None);
    assert_eq!(engine.current_scale(), Some(3.0));
}

#[test]
fn disabling_the_tallest_series_zooms_out() {
    let mut series = two_lines();
    let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);
    engine.compute_scale(FULL, &series, 4);

    set_disabled(&mut series, "a", true);
    let state = engine.compute_scale(FULL, &series, 4);
    assert_eq!(state.scale, VISIBLE_HEIGHT / 50.0);
    assert_eq!(state.direction, ScaleDirection::Out);
}

#[test]
fn toggling_twice_restores_scale() {
    let mut series = two_lines();
    let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);
    let initial = engine.update(FULL, &series, 4);

    set_disabled(&mut series, "a", true);
    engine.update(FULL, &series, 4);
    set_disabled(&mut series, "a", false);
    let restored = engine.update(FULL, &series, 4);

    assert_eq!(restored.windowed.scale, initial.windowed.scale);
    assert_eq!(restored.global.scale, initial.global.scale);
    assert_eq!(restored.windowed.direction, ScaleDirection::In);
}

#[test]
fn nothing_enabled_is_the_empty_state() {
    let mut series = two_lines();
    set_disabled(&mut series, "a", true);
    set_disabled(&mut series, "b", true);

    let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);
    let update = engine.update(FULL, &series, 4);
    assert!(update.windowed.is_empty());
    assert!(update.global.is_empty());
    assert!(update.windowed.bounds.is_none());
}

#[test]
fn all_zero_values_are_the_empty_state() {
    let series = arena(&[("a", vec![0.0, 0.0, 0.0])]);
    let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);
    assert!(engine.compute_scale(FULL, &series, 3).is_empty());
}

#[test]
fn windowed_scale_fits_the_visible_range() {
    let series = arena(&[("a", (1..=10).map(|i| f64::from(i) * 10.0).collect())]);
    let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);

    let half = ViewWindow::new(0.0, 500.0, 1000.0);
    assert_eq!(half.index_bounds(10), (0, 5));
    let update = engine.update(half, &series, 10);

    assert_eq!(update.windowed.scale, VISIBLE_HEIGHT / 50.0);
    assert_eq!(update.global.scale, VISIBLE_HEIGHT / 100.0);
    let bounds = update.windowed.bounds.expect("bounds");
    assert_eq!((bounds.min, bounds.max), (10.0, 50.0));
}

#[test]
fn index_bounds_follow_floor_and_ceil() {
    let window = ViewWindow::new(650.0, 0.0, 1000.0);
    assert_eq!(window.index_bounds(21), (13, 21));

    let narrow = ViewWindow::new(100.0, 850.0, 1000.0);
    assert_eq!(narrow.index_bounds(21), (2, 4));
}

#[test]
fn short_series_contribute_what_they_have() {
    let series = arena(&[("a", vec![1.0, 2.0]), ("b", vec![5.0, 6.0, 70.0, 8.0])]);
    let bounds = enabled_bounds(&series, 2, 4).expect("bounds");
    assert_eq!((bounds.min, bounds.max), (8.0, 70.0));
}

#[test]
fn scale_is_rounded_to_ten_decimals() {
    assert_abs_diff_eq!(scale_for_max(100.0, 3.0), 33.333_333_333_3, epsilon = 1e-12);
    assert_eq!(scale_for_max(100.0, 0.0), 0.0);
    assert_eq!(scale_for_max(100.0, -5.0), 0.0);
}

proptest! {
    #[test]
    fn scale_direction_matches_comparison(
        previous in 0.0f64..1_000.0,
        current in 0.0f64..1_000.0,
    ) {
        let direction = ScaleDirection::between(previous, current);
        let expected = if current > previous {
            ScaleDirection::Out
        } else if current < previous {
            ScaleDirection::In
        } else {
            ScaleDirection::None
        };
        prop_assert_eq!(direction, expected);
    }

    #[test]
    fn double_toggle_is_idempotent(
        a in prop::collection::vec(0.0f64..500.0, 8),
        b in prop::collection::vec(0.0f64..500.0, 8),
        left in 0.0f64..400.0,
        right in 0.0f64..400.0,
    ) {
        let mut series = arena(&[("a", a), ("b", b)]);
        let window = ViewWindow::new(left, right, 1000.0);
        let mut engine = ScaleEngine::new(VISIBLE_HEIGHT);

        let before = engine.update(window, &series, 8);
        set_disabled(&mut series, "b", true);
        engine.update(window, &series, 8);
        set_disabled(&mut series, "b", false);
        let after = engine.update(window, &series, 8);

        prop_assert_eq!(before.windowed.scale, after.windowed.scale);
        prop_assert_eq!(before.global.scale, after.global.scale);
    }
}
