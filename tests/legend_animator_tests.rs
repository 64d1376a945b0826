use overview_chart::api::{LegendAnimator, TickPhase, TickSlot};
use overview_chart::core::ScaleDirection;
use overview_chart::render::{NodeId, NodeKind, Scene};
use proptest::prelude::*;

const WIDTH: f64 = 400.0;
const VISIBLE_HEIGHT: f64 = 250.0;
const SLIDE: f64 = 40.0;

fn mounted() -> (Scene, LegendAnimator) {
    let mut scene = Scene::new(WIDTH, 300.0);
    let parent = scene
        .append(scene.root(), NodeKind::Group, "c-legend")
        .expect("legend group");
    let legend = LegendAnimator::mount(&mut scene, parent, WIDTH, VISIBLE_HEIGHT, 5, SLIDE)
        .expect("mount legend");
    (scene, legend)
}

fn slot_group(scene: &Scene, slot: TickSlot) -> NodeId {
    let class = match slot {
        TickSlot::Even => "c-legend-even",
        TickSlot::Odd => "c-legend-odd",
    };
    scene.find_by_class(class)[0]
}

fn values(legend: &LegendAnimator, slot: TickSlot) -> Vec<f64> {
    legend.slot_ticks(slot).iter().map(|tick| tick.value).collect()
}

#[test]
fn baseline_is_mounted_before_any_scale() {
    let (scene, legend) = mounted();

    assert_eq!(legend.baseline().value, 0.0);
    assert_eq!(legend.baseline().y_position, VISIBLE_HEIGHT);
    assert_eq!(legend.ticks().len(), 1);
    assert_eq!(scene.find_by_class("c-anchor-0").len(), 2);
    assert_eq!(legend.step(), 50.0);
}

#[test]
fn first_rebuild_fills_the_inactive_slot_in_start_state() {
    let (mut scene, mut legend) = mounted();

    let transition = legend
        .rebuild(&mut scene, 2.5)
        .expect("rebuild")
        .expect("first rebuild transitions");
    assert_eq!(transition.entering, TickSlot::Odd);
    assert_eq!(transition.exiting, TickSlot::Even);
    assert_eq!(transition.direction, ScaleDirection::None);
    assert_eq!(legend.active_slot(), TickSlot::Odd);
    assert_eq!(legend.phase(TickSlot::Odd), TickPhase::Entering);

    assert_eq!(values(&legend, TickSlot::Odd), vec![20.0, 40.0, 60.0, 80.0]);
    let rows: Vec<f64> = legend
        .slot_ticks(TickSlot::Odd)
        .iter()
        .map(|tick| tick.y_position)
        .collect();
    assert_eq!(rows, vec![200.0, 150.0, 100.0, 50.0]);

    let group = scene.get(slot_group(&scene, TickSlot::Odd)).expect("group");
    assert_eq!(group.opacity, 0.0);
    assert_eq!(group.children.len(), 8);
}

#[test]
fn unchanged_scale_does_not_rebuild() {
    let (mut scene, mut legend) = mounted();
    legend.rebuild(&mut scene, 2.5).expect("rebuild");
    assert!(legend.rebuild(&mut scene, 2.5).expect("rebuild").is_none());
}

#[test]
fn commit_restyles_on_the_next_frame() {
    let (mut scene, mut legend) = mounted();
    let first = legend
        .rebuild(&mut scene, 2.5)
        .expect("rebuild")
        .expect("transition");

    assert_eq!(legend.commit(&mut scene, first.generation).expect("commit"), None);
    assert_eq!(legend.phase(TickSlot::Odd), TickPhase::Shown);
    let group = scene.get(slot_group(&scene, TickSlot::Odd)).expect("group");
    assert_eq!(group.opacity, 1.0);
    assert_eq!(group.offset_y, 0.0);
}

#[test]
fn zoom_out_slides_sets_down_and_retires_the_old_one() {
    let (mut scene, mut legend) = mounted();
    let first = legend
        .rebuild(&mut scene, 2.5)
        .expect("rebuild")
        .expect("transition");
    legend.commit(&mut scene, first.generation).expect("commit");

    let second = legend
        .rebuild(&mut scene, 5.0)
        .expect("rebuild")
        .expect("transition");
    assert_eq!(second.direction, ScaleDirection::Out);
    assert_eq!(second.entering, TickSlot::Even);
    assert_eq!(values(&legend, TickSlot::Even), vec![10.0, 20.0, 30.0, 40.0]);
    assert_eq!(legend.phase(TickSlot::Odd), TickPhase::Exiting);

    let even = slot_group(&scene, TickSlot::Even);
    assert_eq!(scene.get(even).expect("even").offset_y, -SLIDE);

    let exiting = legend
        .commit(&mut scene, second.generation)
        .expect("commit")
        .expect("old set exits");
    assert_eq!(exiting, TickSlot::Odd);
    let odd = slot_group(&scene, TickSlot::Odd);
    assert_eq!(scene.get(odd).expect("odd").offset_y, SLIDE);
    assert_eq!(scene.get(odd).expect("odd").opacity, 0.0);

    assert!(legend
        .finish_exit(&mut scene, TickSlot::Odd, second.generation)
        .expect("finish exit"));
    assert!(legend.slot_ticks(TickSlot::Odd).is_empty());
    assert!(scene.children(odd).is_empty());
    assert!(!scene.get(odd).expect("odd").visible);
}

#[test]
fn zoom_in_slides_sets_up() {
    let (mut scene, mut legend) = mounted();
    legend.rebuild(&mut scene, 5.0).expect("rebuild");
    let transition = legend
        .rebuild(&mut scene, 2.5)
        .expect("rebuild")
        .expect("transition");

    assert_eq!(transition.direction, ScaleDirection::In);
    let group = slot_group(&scene, transition.entering);
    assert_eq!(scene.get(group).expect("group").offset_y, SLIDE);
}

#[test]
fn stale_generations_are_ignored() {
    let (mut scene, mut legend) = mounted();
    let first = legend
        .rebuild(&mut scene, 2.5)
        .expect("rebuild")
        .expect("transition");
    let second = legend
        .rebuild(&mut scene, 5.0)
        .expect("rebuild")
        .expect("transition");

    assert_eq!(legend.commit(&mut scene, first.generation).expect("commit"), None);
    assert_eq!(legend.phase(TickSlot::Even), TickPhase::Entering);
    assert!(!legend
        .finish_exit(&mut scene, TickSlot::Even, second.generation)
        .expect("active slot is never destroyed"));
}

#[test]
fn empty_state_hides_tick_labels() {
    let (mut scene, mut legend) = mounted();
    legend.rebuild(&mut scene, 0.0).expect("rebuild");

    let ticks = legend.slot_ticks(legend.active_slot());
    assert!(ticks.iter().all(|tick| !tick.visible && tick.label.is_empty()));
    assert!(legend.baseline().visible);
}

proptest! {
    #[test]
    fn baseline_survives_every_cycle(scales in prop::collection::vec(0.0f64..10.0, 1..20)) {
        let (mut scene, mut legend) = mounted();
        for scale in scales {
            if let Some(transition) = legend.rebuild(&mut scene, scale).expect("rebuild") {
                if let Some(slot) = legend
                    .commit(&mut scene, transition.generation)
                    .expect("commit")
                {
                    legend
                        .finish_exit(&mut scene, slot, transition.generation)
                        .expect("finish exit");
                }
            }
            prop_assert_eq!(legend.baseline().value, 0.0);
            prop_assert_eq!(scene.find_by_class("c-anchor-0").len(), 2);
            prop_assert_eq!(legend.ticks()[0].value, 0.0);
        }
    }
}
