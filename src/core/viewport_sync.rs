use serde::{Deserialize, Serialize};

use crate::core::{ViewBox, ViewWindow};

/// Placement of the date-label strip for the current zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPlacement {
    /// Width the full label strip is stretched to.
    pub container_width: f64,
    /// Horizontal offset of the strip; rendered as a negative margin.
    pub offset_left: f64,
}

/// Coordinate transforms derived from one window update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransforms {
    /// Visible fraction of the strip (`visible / width`).
    pub zoom: f64,
    pub main: ViewBox,
    pub preview: ViewBox,
    pub axis: AxisPlacement,
}

/// Maps preview-window changes onto the main and preview view boxes.
///
/// The main canvas pans and zooms inside a fixed-width virtual canvas; the
/// preview canvas always shows the whole virtual width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSync {
    total_chart_width: f64,
    chart_height: f64,
}

impl ViewportSync {
    #[must_use]
    pub fn new(total_chart_width: f64, chart_height: f64) -> Self {
        Self {
            total_chart_width,
            chart_height,
        }
    }

    #[must_use]
    pub fn total_chart_width(&self) -> f64 {
        self.total_chart_width
    }

    pub fn set_chart_height(&mut self, chart_height: f64) {
        self.chart_height = chart_height;
    }

    #[must_use]
    pub fn sync(&self, window: ViewWindow) -> ViewportTransforms {
        let zoom = window.visible_ratio();
        let viewport_width = self.total_chart_width * zoom;
        let viewport_x = if window.width > 0.0 {
            window.left / window.width * self.total_chart_width
        } else {
            0.0
        };

        let (container_width, offset_left) = if zoom > 0.0 {
            let container_width = window.width / zoom;
            (container_width, container_width * (window.left / window.width))
        } else {
            (window.width, 0.0)
        };

        ViewportTransforms {
            zoom,
            main: ViewBox::new(viewport_x, 0.0, viewport_width, self.chart_height),
            preview: ViewBox::new(0.0, 0.0, self.total_chart_width, self.chart_height),
            axis: AxisPlacement {
                container_width,
                offset_left,
            },
        }
    }
}
