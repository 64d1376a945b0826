use approx::assert_relative_eq;
use overview_chart::core::{ViewBox, ViewWindow, ViewportSync};

#[test]
fn anchored_frame_pans_to_the_newest_samples() {
    let sync = ViewportSync::new(1000.0, 250.0);
    let transforms = sync.sync(ViewWindow::new(650.0, 0.0, 1000.0));

    assert_relative_eq!(transforms.zoom, 0.35);
    assert_relative_eq!(transforms.main.x, 650.0);
    assert_relative_eq!(transforms.main.width, 350.0);
    assert_eq!(transforms.main.height, 250.0);
    assert_eq!(transforms.preview, ViewBox::new(0.0, 0.0, 1000.0, 250.0));

    assert_relative_eq!(transforms.axis.container_width, 1000.0 / 0.35, epsilon = 1e-9);
    assert_relative_eq!(
        transforms.axis.offset_left,
        1000.0 / 0.35 * 0.65,
        epsilon = 1e-9
    );
}

#[test]
fn full_window_shows_the_whole_virtual_canvas() {
    let sync = ViewportSync::new(1000.0, 250.0);
    let transforms = sync.sync(ViewWindow::new(0.0, 0.0, 1000.0));

    assert_eq!(transforms.zoom, 1.0);
    assert_eq!(transforms.main, transforms.preview);
    assert_eq!(transforms.axis.container_width, 1000.0);
    assert_eq!(transforms.axis.offset_left, 0.0);
}

#[test]
fn strip_width_and_virtual_width_are_independent() {
    let sync = ViewportSync::new(1000.0, 200.0);
    let transforms = sync.sync(ViewWindow::new(250.0, 0.0, 500.0));

    assert_relative_eq!(transforms.zoom, 0.5);
    assert_relative_eq!(transforms.main.x, 500.0);
    assert_relative_eq!(transforms.main.width, 500.0);
    assert_relative_eq!(transforms.axis.container_width, 1000.0);
    assert_relative_eq!(transforms.axis.offset_left, 500.0);
}

#[test]
fn chart_height_updates_both_view_boxes() {
    let mut sync = ViewportSync::new(1000.0, 250.0);
    sync.set_chart_height(180.0);
    let transforms = sync.sync(ViewWindow::new(0.0, 500.0, 1000.0));

    assert_eq!(transforms.main.height, 180.0);
    assert_eq!(transforms.preview.height, 180.0);
    assert_relative_eq!(transforms.main.horizontal_scale(1000.0), 2.0);
}
