use overview_chart::core::{ChartDescriptor, DataSet, SeriesKey};

const TWO_LINES: &str = r##"[{
    "columns": [
        ["x", 1542412800000, 1542499200000, 1542585600000],
        ["y0", 37, 20, 32],
        ["y1", 22, 12, 30]
    ],
    "types": {"y0": "line", "y1": "line", "x": "x"},
    "names": {"y0": "#0", "y1": "#1"},
    "colors": {"y0": "#3DC23F", "y1": "#F34C44"}
}]"##;

fn single(input: &str) -> DataSet {
    let mut list = DataSet::list_from_json_str(input).expect("valid payload");
    assert_eq!(list.len(), 1);
    list.remove(0)
}

#[test]
fn loads_time_axis_and_series_in_column_order() {
    let data = single(TWO_LINES);

    assert_eq!(
        data.time_axis().timestamps(),
        &[1_542_412_800_000, 1_542_499_200_000, 1_542_585_600_000]
    );
    assert_eq!(data.time_axis().span_millis(), 2 * 86_400_000);

    let keys: Vec<&str> = data.series().keys().map(SeriesKey::as_str).collect();
    assert_eq!(keys, vec!["y0", "y1"]);

    let y1 = data.series().get(&SeriesKey::new("y1")).expect("y1 present");
    assert_eq!(y1.name(), "#1");
    assert_eq!(y1.color(), "#F34C44");
    assert_eq!(y1.values(), &[22.0, 12.0, 30.0]);
    assert_eq!(y1.max_value(), 30.0);
    assert!(y1.is_enabled());
}

#[test]
fn missing_name_falls_back_to_column_id() {
    let input = r##"[{
        "columns": [["x", 1, 2], ["y0", 5, 6]],
        "types": {"y0": "line", "x": "x"},
        "colors": {"y0": "#fff"}
    }]"##;
    let data = single(input);
    let line = data.series().get(&SeriesKey::new("y0")).expect("y0 present");
    assert_eq!(line.name(), "y0");
}

#[test]
fn fractional_timestamps_are_rounded() {
    let input = r##"[{
        "columns": [["x", 1.4, 2.6], ["y0", 5, 6]],
        "types": {"y0": "line", "x": "x"},
        "colors": {"y0": "#fff"}
    }]"##;
    assert_eq!(single(input).time_axis().timestamps(), &[1, 3]);
}

#[test]
fn length_mismatch_is_tolerated() {
    let input = r##"[{
        "columns": [["x", 1, 2, 3], ["y0", 5, 6]],
        "types": {"y0": "line", "x": "x"},
        "colors": {"y0": "#fff"}
    }]"##;
    let data = single(input);
    assert_eq!(data.time_axis().len(), 3);
    assert_eq!(
        data.series()
            .get(&SeriesKey::new("y0"))
            .expect("y0 present")
            .len(),
        2
    );
}

#[test]
fn malformed_descriptors_are_rejected() {
    let cases = [
        (
            "missing color",
            r##"{"columns": [["x", 1, 2], ["y0", 1, 2]], "types": {"y0": "line", "x": "x"}}"##,
        ),
        (
            "bad color",
            r##"{"columns": [["x", 1, 2], ["y0", 1, 2]], "types": {"y0": "line", "x": "x"}, "colors": {"y0": "green"}}"##,
        ),
        (
            "missing type",
            r##"{"columns": [["x", 1, 2], ["y0", 1, 2]], "types": {"x": "x"}, "colors": {"y0": "#fff"}}"##,
        ),
        (
            "two axes",
            r##"{"columns": [["x", 1, 2], ["t", 1, 2]], "types": {"x": "x", "t": "x"}}"##,
        ),
        (
            "no axis",
            r##"{"columns": [["y0", 1, 2]], "types": {"y0": "line"}, "colors": {"y0": "#fff"}}"##,
        ),
        (
            "duplicate column",
            r##"{"columns": [["x", 1, 2], ["y0", 1, 2], ["y0", 3, 4]], "types": {"y0": "line", "x": "x"}, "colors": {"y0": "#fff"}}"##,
        ),
        (
            "non-increasing axis",
            r##"{"columns": [["x", 2, 1], ["y0", 1, 2]], "types": {"y0": "line", "x": "x"}, "colors": {"y0": "#fff"}}"##,
        ),
        (
            "non-numeric sample",
            r##"{"columns": [["x", 1, 2], ["y0", 1, "two"]], "types": {"y0": "line", "x": "x"}, "colors": {"y0": "#fff"}}"##,
        ),
    ];

    for (case, input) in cases {
        let descriptor: ChartDescriptor =
            serde_json::from_str(input).expect("descriptor shape parses");
        assert!(
            DataSet::from_descriptor(&descriptor).is_err(),
            "{case} should be rejected"
        );
    }
}

#[test]
fn invalid_json_is_an_error() {
    assert!(DataSet::list_from_json_str("{not json").is_err());
}
