use overview_chart::core::{TimeAxis, ViewWindow};
use overview_chart::interaction::{
    DragInput, DragMode, DragOutcome, DragSide, RangeSelector, resolve_drag,
};
use proptest::prelude::*;

const MIN_WIDTH: f64 = 30.0;
const HANDLE_WIDTH: f64 = 20.0;

fn selector() -> RangeSelector {
    let axis = TimeAxis::new((0..21).map(|i| i * 86_400_000).collect()).expect("axis");
    let strip_width = axis.total_width(50.0);
    assert_eq!(strip_width, 1000.0);

    let window = ViewWindow::anchored_right(strip_width, 35.0);
    RangeSelector::new(window, MIN_WIDTH, HANDLE_WIDTH).expect("selector")
}

#[test]
fn initial_frame_is_anchored_right() {
    let selector = selector();
    assert_eq!(selector.window(), ViewWindow::new(650.0, 0.0, 1000.0));
    assert_eq!(selector.mode(), DragMode::Idle);
}

#[test]
fn right_edge_drag_shrinks_the_frame() {
    let mut selector = selector();
    assert_eq!(selector.pointer_down(995.0), Some(DragSide::Right));

    let outcome = selector.pointer_move(795.0);
    let DragOutcome::Updated(window) = outcome else {
        panic!("expected an update, got {outcome:?}");
    };
    assert_eq!(window.right, 200.0);
    assert_eq!(window.visible_width(), 150.0);
}

#[test]
fn edge_drag_below_minimum_keeps_previous_window() {
    let mut selector = selector();
    selector.begin_drag(DragSide::Right, 1000.0);
    assert!(matches!(
        selector.pointer_move(800.0),
        DragOutcome::Updated(_)
    ));

    assert_eq!(selector.pointer_move(670.0), DragOutcome::Rejected);
    assert_eq!(selector.window().visible_width(), 150.0);
}

#[test]
fn left_edge_drag_clamps_filler_at_zero() {
    let mut selector = selector();
    assert_eq!(selector.pointer_down(655.0), Some(DragSide::Left));
    selector.pointer_move(-2000.0);
    assert_eq!(selector.window(), ViewWindow::new(0.0, 0.0, 1000.0));
}

#[test]
fn frame_move_snaps_to_boundary_and_keeps_span() {
    let mut selector = selector();
    assert_eq!(selector.pointer_down(800.0), Some(DragSide::Move));

    assert_eq!(selector.pointer_move(900.0), DragOutcome::Unchanged);

    selector.pointer_move(100.0);
    assert_eq!(selector.window(), ViewWindow::new(0.0, 650.0, 1000.0));
    assert_eq!(selector.window().visible_width(), 350.0);
}

#[test]
fn hit_test_requires_pointer_strictly_inside_frame() {
    let selector = selector();
    assert_eq!(selector.hit_test(600.0), None);
    assert_eq!(selector.hit_test(650.0), None);
    assert_eq!(selector.hit_test(1000.0), None);
    assert_eq!(selector.hit_test(660.0), Some(DragSide::Left));
    assert_eq!(selector.hit_test(985.0), Some(DragSide::Right));
    assert_eq!(selector.hit_test(820.0), Some(DragSide::Move));
}

#[test]
fn pointer_down_while_dragging_is_ignored() {
    let mut selector = selector();
    assert_eq!(selector.pointer_down(800.0), Some(DragSide::Move));
    assert_eq!(selector.pointer_down(660.0), None);
    assert_eq!(selector.mode(), DragMode::Dragging(DragSide::Move));

    assert!(selector.pointer_up());
    assert!(!selector.pointer_up());
    assert_eq!(selector.pointer_move(700.0), DragOutcome::Idle);
}

#[test]
fn apply_drag_uses_gesture_layer_positions() {
    let mut selector = selector();
    assert!(selector.begin_drag(DragSide::Left, 0.0));
    let outcome = selector.apply_drag(DragInput::new(10.0, -40.0));
    assert_eq!(
        outcome,
        DragOutcome::Updated(ViewWindow::new(600.0, 0.0, 1000.0))
    );
}

#[test]
fn resize_scales_fillers_and_cancels_drag() {
    let mut selector = selector();
    selector.pointer_down(800.0);

    let window = selector.resize(500.0);
    assert_eq!(window, ViewWindow::new(325.0, 0.0, 500.0));
    assert!(!selector.is_dragging());
}

#[test]
fn resize_restores_minimum_width() {
    let window = ViewWindow::new(490.0, 490.0, 1000.0);
    let mut selector = RangeSelector::new(window, MIN_WIDTH, HANDLE_WIDTH).expect("selector");
    assert_eq!(selector.window().visible_width(), MIN_WIDTH);

    let resized = selector.resize(100.0);
    assert!(resized.left >= 0.0 && resized.right >= 0.0);
    assert!(resized.visible_width() >= MIN_WIDTH - 1e-9);
}

#[test]
fn resolve_drag_rejects_non_finite_input() {
    let origin = ViewWindow::new(100.0, 100.0, 1000.0);
    let input = DragInput::new(0.0, f64::NAN);
    assert_eq!(resolve_drag(DragSide::Move, origin, input, MIN_WIDTH), None);
}

fn drag_side() -> impl Strategy<Value = DragSide> {
    prop_oneof![
        Just(DragSide::Left),
        Just(DragSide::Right),
        Just(DragSide::Move)
    ]
}

proptest! {
    #[test]
    fn window_invariants_hold_after_any_drag_sequence(
        drags in prop::collection::vec(
            (drag_side(), prop::collection::vec(-1_500.0f64..1_500.0, 1..6)),
            1..12,
        )
    ) {
        let mut selector = selector();
        for (side, moves) in drags {
            selector.begin_drag(side, 500.0);
            for delta in moves {
                selector.pointer_move(500.0 + delta);
                let window = selector.window();
                prop_assert!(window.left >= 0.0);
                prop_assert!(window.right >= 0.0);
                prop_assert!(window.visible_width() >= MIN_WIDTH - 1e-9);
            }
            selector.pointer_up();
        }
    }
}
