use overview_chart::{ChartConfig, ChartError};

#[test]
fn defaults_are_valid() {
    let config = ChartConfig::default();
    config.validate().expect("defaults validate");

    assert_eq!(config.tick_width, 50.0);
    assert_eq!(config.anchor_count, 5);
    assert_eq!(config.frame_width_percent, 35.0);
    assert_eq!(config.rescale_debounce_ms, 120);
    assert_eq!(config.legend_transition_ms, 300);
}

#[test]
fn partial_json_takes_defaults() {
    let config = ChartConfig::from_json_str(r#"{"tick_width": 20, "anchor_count": 6}"#)
        .expect("partial config");

    assert_eq!(config.tick_width, 20.0);
    assert_eq!(config.anchor_count, 6);
    assert_eq!(config.preview_height, ChartConfig::default().preview_height);
}

#[test]
fn json_round_trip_keeps_builder_values() {
    let config = ChartConfig::default()
        .with_tick_width(25.0)
        .with_min_window_width(60.0)
        .with_rescale_debounce_ms(80);
    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(ChartConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        ChartConfig::default().with_tick_width(0.0),
        ChartConfig::default().with_tick_width(f64::NAN),
        ChartConfig::default().with_frame_width_percent(0.0),
        ChartConfig::default().with_frame_width_percent(150.0),
        ChartConfig::default().with_anchor_count(0),
        ChartConfig::default().with_handle_width(-1.0),
        ChartConfig::default().with_preview_height(f64::INFINITY),
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(ChartError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        ChartConfig::from_json_str("{\"tick_width\": "),
        Err(ChartError::InvalidConfig(_))
    ));
    assert!(matches!(
        ChartConfig::from_json_str(r#"{"frame_width_percent": -5}"#),
        Err(ChartError::InvalidConfig(_))
    ));
}
