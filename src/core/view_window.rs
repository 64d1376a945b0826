use serde::{Deserialize, Serialize};

/// Preview-strip selection expressed as filler widths.
///
/// `left` and `right` are the widths of the unselected regions on either side
/// of the preview frame; `width` is the full strip width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub left: f64,
    pub right: f64,
    pub width: f64,
}

impl ViewWindow {
    #[must_use]
    pub const fn new(left: f64, right: f64, width: f64) -> Self {
        Self { left, right, width }
    }

    /// Initial window: a frame of `frame_width_percent` anchored to the right edge.
    #[must_use]
    pub fn anchored_right(width: f64, frame_width_percent: f64) -> Self {
        let frame = width * (frame_width_percent / 100.0);
        Self {
            left: (width - frame).max(0.0),
            right: 0.0,
            width,
        }
    }

    /// Pixel span of the selected frame.
    #[must_use]
    pub fn visible_width(self) -> f64 {
        self.width - self.left - self.right
    }

    /// Selected fraction of the strip in `[0, 1]`.
    #[must_use]
    pub fn visible_ratio(self) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        self.visible_width() / self.width
    }

    /// Half-open sample range `[from, to)` covered by the window over `len` samples.
    #[must_use]
    pub fn index_bounds(self, len: usize) -> (usize, usize) {
        if self.width <= 0.0 || len == 0 {
            return (0, len);
        }
        let n = len as f64;
        let from = (self.left / self.width * n).floor().clamp(0.0, n) as usize;
        let to = ((1.0 - self.right / self.width) * n).ceil().clamp(0.0, n) as usize;
        (from, to.max(from))
    }
}
