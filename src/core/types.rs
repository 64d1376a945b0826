use serde::{Deserialize, Serialize};

/// Pixel size of the host container the chart is mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// SVG-style view box: the visible sub-rectangle of a virtual coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Screen pixels per virtual unit along X when the box is stretched to `screen_width`.
    #[must_use]
    pub fn horizontal_scale(self, screen_width: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        screen_width / self.width
    }
}
