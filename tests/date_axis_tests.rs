use std::sync::Arc;

use overview_chart::api::{
    DateAxis, DateLabelFormatterFn, default_axis_date_label, default_tooltip_date_label,
};
use overview_chart::core::TimeAxis;

const DAY_MS: i64 = 86_400_000;
// 2018-11-17T00:00:00Z, a Saturday.
const START_MS: i64 = 1_542_412_800_000;

fn axis(len: i64) -> TimeAxis {
    TimeAxis::new((0..len).map(|i| START_MS + i * DAY_MS).collect()).expect("axis")
}

fn formatter() -> DateLabelFormatterFn {
    Arc::new(default_axis_date_label)
}

#[test]
fn default_formatters_use_short_month_names() {
    assert_eq!(default_axis_date_label(START_MS), "Nov 17");
    assert_eq!(default_tooltip_date_label(START_MS), "Sat, Nov 17");
}

#[test]
fn labels_are_formatted_once_and_spread_by_percent() {
    let date_axis = DateAxis::new(&axis(5), 40.0, &formatter());
    let labels = date_axis.labels();

    assert_eq!(labels.len(), 5);
    assert_eq!(labels[1].text, "Nov 18");
    assert_eq!(labels[0].position_percent, 0.0);
    assert_eq!(labels[2].position_percent, 50.0);
    assert_eq!(labels[4].position_percent, 100.0);
    assert!(labels.iter().all(|label| !label.visible));
}

#[test]
fn density_halves_from_the_newest_label() {
    let mut date_axis = DateAxis::new(&axis(20), 40.0, &formatter());

    // 300 / 60 => five labels fit; twenty samples need a step of four.
    assert!(date_axis.set_width(300.0));
    assert_eq!(date_axis.step(), 4);

    let visible: Vec<usize> = date_axis
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, label)| label.visible)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(visible, vec![0, 3, 7, 11, 15, 19]);
}

#[test]
fn wide_strip_still_thins_every_other_label() {
    let mut date_axis = DateAxis::new(&axis(6), 40.0, &formatter());
    assert!(date_axis.set_width(10_000.0));
    assert_eq!(date_axis.step(), 2);
    assert_eq!(date_axis.visible_labels().count(), 4);
}

#[test]
fn unchanged_density_reports_no_change() {
    let mut date_axis = DateAxis::new(&axis(20), 40.0, &formatter());
    assert!(date_axis.set_width(300.0));
    assert!(!date_axis.set_width(300.0));
    assert!(!date_axis.set_width(310.0));
}

#[test]
fn label_x_follows_width_and_offset() {
    let mut date_axis = DateAxis::new(&axis(5), 40.0, &formatter());
    date_axis.set_width(2000.0);
    date_axis.set_left(500.0);

    let label = date_axis.labels()[2].clone();
    assert_eq!(date_axis.label_x(&label), 500.0);
    assert_eq!(date_axis.offset_left(), 500.0);
    assert_eq!(date_axis.container_width(), 2000.0);
}

#[test]
fn custom_formatter_is_used() {
    let custom: DateLabelFormatterFn = Arc::new(|ms| format!("t{}", ms / DAY_MS));
    let date_axis = DateAxis::new(&axis(2), 40.0, &custom);
    assert_eq!(date_axis.labels()[0].text, format!("t{}", START_MS / DAY_MS));
}
