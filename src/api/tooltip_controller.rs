use serde::{Deserialize, Serialize};

use crate::core::{SeriesArena, SeriesKey, TimeAxis, ViewBox};

use super::DateLabelFormatterFn;

/// Side of the cursor the tooltip box is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipSide {
    Right,
    Left,
}

/// One series row of the tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub key: SeriesKey,
    pub name: String,
    pub color: String,
    pub value: f64,
    /// Marker position on the main view, in screen pixels.
    pub marker_x: f64,
    pub marker_y: f64,
}

/// Everything needed to draw the hover overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    pub index: usize,
    pub timestamp_ms: i64,
    pub date_label: String,
    /// Screen X of the vertical guide line, snapped to the sample.
    pub guide_x: f64,
    pub box_x: f64,
    pub side: TooltipSide,
    pub entries: Vec<TooltipEntry>,
}

/// Maps hover positions on the main view to samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipController {
    tick_width: f64,
    chart_width: f64,
    box_width: f64,
    margin: f64,
}

impl TooltipController {
    #[must_use]
    pub fn new(tick_width: f64, chart_width: f64, box_width: f64, margin: f64) -> Self {
        Self {
            tick_width,
            chart_width,
            box_width,
            margin,
        }
    }

    #[must_use]
    pub fn box_width(&self) -> f64 {
        self.box_width
    }

    pub fn set_chart_width(&mut self, chart_width: f64) {
        self.chart_width = chart_width;
    }

    /// Nearest sample under `pixel_x`; ties round up. Clamped to `[0, len - 1]`.
    #[must_use]
    pub fn resolve_index(
        &self,
        pixel_x: f64,
        viewport_scale: f64,
        viewport_offset_x: f64,
        len: usize,
    ) -> Option<usize> {
        if len == 0 || !pixel_x.is_finite() || viewport_scale <= 0.0 || self.tick_width <= 0.0 {
            return None;
        }
        let chart_x = pixel_x / viewport_scale + viewport_offset_x;
        let index = (chart_x / self.tick_width + 0.5).floor();
        Some(index.clamp(0.0, (len - 1) as f64) as usize)
    }

    /// Box left edge: right of the cursor unless that overflows the chart.
    #[must_use]
    pub fn place_box(&self, pixel_x: f64) -> (f64, TooltipSide) {
        let right = pixel_x + self.margin;
        if right + self.box_width <= self.chart_width {
            (right, TooltipSide::Right)
        } else {
            (
                (pixel_x - self.margin - self.box_width).max(0.0),
                TooltipSide::Left,
            )
        }
    }

    /// Builds the hover payload for the enabled series.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn resolve(
        &self,
        pixel_x: f64,
        main: ViewBox,
        time_axis: &TimeAxis,
        series: &SeriesArena,
        windowed_scale: f64,
        visible_height: f64,
        formatter: &DateLabelFormatterFn,
    ) -> Option<TooltipPayload> {
        let viewport_scale = main.horizontal_scale(self.chart_width);
        let index = self.resolve_index(pixel_x, viewport_scale, main.x, time_axis.len())?;
        let timestamp_ms = time_axis.timestamp(index)?;
        let guide_x = (index as f64 * self.tick_width - main.x) * viewport_scale;

        let entries = series
            .values()
            .filter(|line| line.is_enabled())
            .filter_map(|line| {
                let value = *line.values().get(index)?;
                Some(TooltipEntry {
                    key: line.key().clone(),
                    name: line.name().to_owned(),
                    color: line.color().to_owned(),
                    value,
                    marker_x: guide_x,
                    marker_y: visible_height - value * windowed_scale,
                })
            })
            .collect();

        let (box_x, side) = self.place_box(pixel_x);
        Some(TooltipPayload {
            index,
            timestamp_ms,
            date_label: formatter(timestamp_ms),
            guide_x,
            box_x,
            side,
            entries,
        })
    }
}
