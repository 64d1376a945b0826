use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{SeriesArena, SeriesKey, ViewBox, ViewWindow, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasNode, CirclePrimitive, Color, LinePrimitive, NodeId, NodeKind, PathPrimitive,
    RectPrimitive, Scene, TextHAlign, TextPrimitive,
};

use super::{ChartConfig, DateAxis};

pub(super) const TITLE_HEIGHT_PX: f64 = 28.0;
pub(super) const BUTTONS_HEIGHT_PX: f64 = 44.0;
const BUTTON_SPACING_PX: f64 = 112.0;
const BUTTON_ICON_PX: f64 = 20.0;
const BUTTON_ICON_VIEW_BOX: f64 = 100.0;
pub(super) const BUTTON_MASK_DISABLED: f64 = 40.0;
pub(super) const BUTTON_MASK_ENABLED: f64 = 0.0;
const FRAME_BORDER_PX: f64 = 2.0;
const FRAME_HANDLE_PX: f64 = 5.0;
const LINE_STROKE_PX: f64 = 2.0;
const DATE_LABEL_BASELINE_PX: f64 = 20.0;
const TOOLTIP_ROW_PX: f64 = 18.0;
const TOOLTIP_MARKER_RADIUS_PX: f64 = 4.0;

const TEXT_COLOR: Color = Color::rgb(0.13, 0.16, 0.2);
const MUTED_TEXT_COLOR: Color = Color::rgb(0.56, 0.62, 0.67);
const FILLER_COLOR: Color = Color::rgba(0.89, 0.93, 0.96, 0.6);
const FRAME_COLOR: Color = Color::rgba(0.73, 0.8, 0.86, 0.8);
const GUIDE_COLOR: Color = Color::rgba(0.56, 0.62, 0.67, 0.5);
const TOOLTIP_FILL: Color = Color::rgb(1.0, 1.0, 1.0);
const MASK_FILL: Color = Color::rgb(1.0, 1.0, 1.0);

/// Vertical bands of the chart inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Top of the main canvas.
    pub chart_top: f64,
    /// Main canvas height, date-label band included.
    pub chart_height: f64,
    /// Height available to the lines; the zero baseline sits here.
    pub visible_height: f64,
    pub preview_top: f64,
    pub preview_height: f64,
    pub buttons_top: f64,
}

impl ChartLayout {
    pub fn resolve(container: Viewport, config: &ChartConfig) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport {
            width: container.width,
            height: container.height,
        };
        if !container.is_valid() {
            return Err(invalid());
        }

        let chart_top = TITLE_HEIGHT_PX;
        let chart_height =
            container.height - TITLE_HEIGHT_PX - config.preview_height - BUTTONS_HEIGHT_PX;
        let visible_height = chart_height - config.x_axis_height;
        if visible_height <= 0.0 {
            return Err(invalid());
        }

        let preview_top = chart_top + chart_height;
        Ok(Self {
            width: container.width,
            height: container.height,
            chart_top,
            chart_height,
            visible_height,
            preview_top,
            preview_height: config.preview_height,
            buttons_top: preview_top + config.preview_height,
        })
    }
}

/// Scene handles owned by one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SeriesRenderState {
    pub(super) main_path: NodeId,
    pub(super) preview_path: NodeId,
    pub(super) button: NodeId,
    pub(super) button_mask: NodeId,
    pub(super) tooltip_marker: NodeId,
    pub(super) tooltip_row: NodeId,
    /// Scale the current path data was generated for.
    pub(super) main_scale: Option<f64>,
    pub(super) preview_scale: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PreviewFrameNodes {
    pub(super) left_filler: NodeId,
    pub(super) right_filler: NodeId,
    pub(super) left_handle: NodeId,
    pub(super) right_handle: NodeId,
    pub(super) top_border: NodeId,
    pub(super) bottom_border: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TooltipNodes {
    pub(super) group: NodeId,
    pub(super) guide: NodeId,
    pub(super) panel: NodeId,
    pub(super) date: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct SceneNodes {
    pub(super) title: NodeId,
    pub(super) legend: NodeId,
    pub(super) main_canvas: NodeId,
    pub(super) date_labels: Vec<NodeId>,
    pub(super) preview_canvas: NodeId,
    pub(super) preview_frame: PreviewFrameNodes,
    pub(super) tooltip: TooltipNodes,
}

/// Result of [`build_scene`]: the scene plus handles to everything the chart mutates.
pub(super) struct BuiltScene {
    pub(super) scene: Scene,
    pub(super) nodes: SceneNodes,
    pub(super) series: IndexMap<SeriesKey, SeriesRenderState>,
}

/// Appends the static structure of the chart.
///
/// Paths start empty and the tooltip hidden; the first window update fills them.
pub(super) fn build_scene(
    layout: &ChartLayout,
    title: &str,
    total_chart_width: f64,
    series: &SeriesArena,
    date_axis: &DateAxis,
) -> ChartResult<BuiltScene> {
    let mut scene = Scene::new(layout.width, layout.height);
    let root = scene.root();

    let title = scene.append(
        root,
        NodeKind::Text(TextPrimitive::new(
            title,
            0.0,
            TITLE_HEIGHT_PX * 0.7,
            16.0,
            TEXT_COLOR,
            TextHAlign::Left,
        )),
        "c-title",
    )?;

    let legend = scene.append(root, NodeKind::Group, "c-legend")?;
    scene.set_offset(legend, 0.0, layout.chart_top)?;

    let main_canvas = scene.append(
        root,
        NodeKind::Canvas(CanvasNode {
            x: 0.0,
            y: layout.chart_top,
            width: layout.width,
            height: layout.chart_height,
            view_box: ViewBox::new(0.0, 0.0, total_chart_width, layout.chart_height),
            stretch: true,
        }),
        "c-main",
    )?;

    let axis = scene.append(root, NodeKind::Group, "c-x-axis")?;
    scene.set_offset(axis, 0.0, layout.chart_top + layout.visible_height)?;
    let mut date_labels = Vec::with_capacity(date_axis.labels().len());
    for label in date_axis.labels() {
        let node = scene.append(
            axis,
            NodeKind::Text(TextPrimitive::new(
                label.text.clone(),
                0.0,
                DATE_LABEL_BASELINE_PX,
                11.0,
                MUTED_TEXT_COLOR,
                TextHAlign::Center,
            )),
            "c-date",
        )?;
        scene.set_visible(node, false)?;
        date_labels.push(node);
    }

    let preview_canvas = scene.append(
        root,
        NodeKind::Canvas(CanvasNode {
            x: 0.0,
            y: layout.preview_top,
            width: layout.width,
            height: layout.preview_height,
            view_box: ViewBox::new(0.0, 0.0, total_chart_width, layout.chart_height),
            stretch: true,
        }),
        "c-preview",
    )?;

    let frame_group = scene.append(root, NodeKind::Group, "c-preview-frame")?;
    scene.set_offset(frame_group, 0.0, layout.preview_top)?;
    let mut frame_rect = |class: &str, fill: Color| {
        scene.append(
            frame_group,
            NodeKind::Rect(RectPrimitive::new(0.0, 0.0, 0.0, 0.0, fill)),
            class,
        )
    };
    let preview_frame = PreviewFrameNodes {
        left_filler: frame_rect("c-filler c-filler-left", FILLER_COLOR)?,
        right_filler: frame_rect("c-filler c-filler-right", FILLER_COLOR)?,
        left_handle: frame_rect("c-frame-handle c-frame-handle-left", FRAME_COLOR)?,
        right_handle: frame_rect("c-frame-handle c-frame-handle-right", FRAME_COLOR)?,
        top_border: frame_rect("c-frame-border", FRAME_COLOR)?,
        bottom_border: frame_rect("c-frame-border", FRAME_COLOR)?,
    };

    let tooltip_group = scene.append(root, NodeKind::Group, "c-tooltip")?;
    scene.set_offset(tooltip_group, 0.0, layout.chart_top)?;
    scene.set_visible(tooltip_group, false)?;
    let guide = scene.append(
        tooltip_group,
        NodeKind::Line(tooltip_guide(0.0, layout.visible_height)),
        "c-tooltip-guide",
    )?;
    let markers = scene.append(tooltip_group, NodeKind::Group, "c-tooltip-markers")?;
    let panel = scene.append(
        tooltip_group,
        NodeKind::Rect(RectPrimitive::new(0.0, 0.0, 0.0, 0.0, TOOLTIP_FILL)),
        "c-tooltip-panel",
    )?;
    let date = scene.append(
        tooltip_group,
        NodeKind::Text(TextPrimitive::new(
            "",
            0.0,
            0.0,
            12.0,
            TEXT_COLOR,
            TextHAlign::Left,
        )),
        "c-tooltip-date",
    )?;
    let rows = scene.append(tooltip_group, NodeKind::Group, "c-tooltip-rows")?;

    let buttons = scene.append(root, NodeKind::Group, "c-buttons")?;
    scene.set_offset(buttons, 0.0, layout.buttons_top)?;

    let mut series_nodes = IndexMap::with_capacity(series.len());
    for (index, (key, line)) in series.iter().enumerate() {
        let color = Color::from_hex(line.color())?;
        let main_path = scene.append(
            main_canvas,
            NodeKind::Path(PathPrimitive::new("", LINE_STROKE_PX, color)),
            "c-line",
        )?;
        let preview_path = scene.append(
            preview_canvas,
            NodeKind::Path(PathPrimitive::new("", LINE_STROKE_PX, color)),
            "c-line",
        )?;

        let button = scene.append(buttons, NodeKind::Group, "c-button")?;
        scene.set_offset(button, index as f64 * BUTTON_SPACING_PX, 0.0)?;
        scene.toggle_class(button, "c-button-off", line.is_disabled())?;
        let icon = scene.append(
            button,
            NodeKind::Canvas(CanvasNode {
                x: 0.0,
                y: (BUTTONS_HEIGHT_PX - BUTTON_ICON_PX) / 2.0,
                width: BUTTON_ICON_PX,
                height: BUTTON_ICON_PX,
                view_box: ViewBox::new(0.0, 0.0, BUTTON_ICON_VIEW_BOX, BUTTON_ICON_VIEW_BOX),
                stretch: false,
            }),
            "c-button-icon",
        )?;
        let half = BUTTON_ICON_VIEW_BOX / 2.0;
        scene.append(
            icon,
            NodeKind::Circle(CirclePrimitive::new(half, half, half, color)),
            "c-button-disc",
        )?;
        let mask_radius = if line.is_disabled() {
            BUTTON_MASK_DISABLED
        } else {
            BUTTON_MASK_ENABLED
        };
        let button_mask = scene.append(
            icon,
            NodeKind::Circle(CirclePrimitive::new(half, half, mask_radius, MASK_FILL)),
            "c-button-mask",
        )?;
        scene.append(
            button,
            NodeKind::Text(TextPrimitive::new(
                line.name(),
                BUTTON_ICON_PX + 8.0,
                BUTTONS_HEIGHT_PX / 2.0 + 4.0,
                13.0,
                TEXT_COLOR,
                TextHAlign::Left,
            )),
            "c-button-label",
        )?;

        let tooltip_marker = scene.append(
            markers,
            NodeKind::Circle(CirclePrimitive::new(
                0.0,
                0.0,
                TOOLTIP_MARKER_RADIUS_PX,
                color,
            )),
            "c-tooltip-marker",
        )?;
        let tooltip_row = scene.append(
            rows,
            NodeKind::Text(TextPrimitive::new("", 0.0, 0.0, 12.0, color, TextHAlign::Left)),
            "c-tooltip-row",
        )?;

        series_nodes.insert(
            key.clone(),
            SeriesRenderState {
                main_path,
                preview_path,
                button,
                button_mask,
                tooltip_marker,
                tooltip_row,
                main_scale: None,
                preview_scale: None,
            },
        );
    }

    Ok(BuiltScene {
        scene,
        nodes: SceneNodes {
            title,
            legend,
            main_canvas,
            date_labels,
            preview_canvas,
            preview_frame,
            tooltip: TooltipNodes {
                group: tooltip_group,
                guide,
                panel,
                date,
            },
        },
        series: series_nodes,
    })
}

/// Positions fillers, handles and borders for `window`.
pub(super) fn place_preview_frame(
    scene: &mut Scene,
    frame: &PreviewFrameNodes,
    window: ViewWindow,
    preview_height: f64,
) -> ChartResult<()> {
    let frame_x = window.left;
    let frame_width = window.visible_width().max(0.0);
    let rects = [
        (frame.left_filler, 0.0, 0.0, window.left, preview_height, FILLER_COLOR),
        (
            frame.right_filler,
            window.width - window.right,
            0.0,
            window.right,
            preview_height,
            FILLER_COLOR,
        ),
        (frame.left_handle, frame_x, 0.0, FRAME_HANDLE_PX, preview_height, FRAME_COLOR),
        (
            frame.right_handle,
            frame_x + frame_width - FRAME_HANDLE_PX,
            0.0,
            FRAME_HANDLE_PX,
            preview_height,
            FRAME_COLOR,
        ),
        (frame.top_border, frame_x, 0.0, frame_width, FRAME_BORDER_PX, FRAME_COLOR),
        (
            frame.bottom_border,
            frame_x,
            preview_height - FRAME_BORDER_PX,
            frame_width,
            FRAME_BORDER_PX,
            FRAME_COLOR,
        ),
    ];
    for (node, x, y, width, height, fill) in rects {
        scene.set_kind(
            node,
            NodeKind::Rect(RectPrimitive::new(x, y, width.max(0.0), height, fill)),
        )?;
    }
    Ok(())
}

pub(super) fn tooltip_guide(x: f64, visible_height: f64) -> LinePrimitive {
    LinePrimitive::new(x, 0.0, x, visible_height, 1.0, GUIDE_COLOR)
}

/// Tooltip panel geometry for `rows` series rows.
pub(super) fn tooltip_panel(box_x: f64, box_width: f64, rows: usize) -> RectPrimitive {
    let height = TOOLTIP_ROW_PX * (rows as f64 + 1.0) + 8.0;
    RectPrimitive::new(box_x, 0.0, box_width, height, TOOLTIP_FILL)
}

pub(super) fn tooltip_text_y(row: usize) -> f64 {
    TOOLTIP_ROW_PX * (row as f64 + 1.0)
}
