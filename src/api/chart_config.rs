use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Public chart configuration.
///
/// Serializable so host applications can ship chart setup as JSON; every
/// field has a default so partial documents are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Virtual pixels between two consecutive samples.
    #[serde(default = "default_tick_width")]
    pub tick_width: f64,
    /// Height of the preview strip.
    #[serde(default = "default_preview_height")]
    pub preview_height: f64,
    /// Number of legend tick rows, zero baseline included.
    #[serde(default = "default_anchor_count")]
    pub anchor_count: usize,
    /// Initial preview frame width in percent of the strip.
    #[serde(default = "default_frame_width_percent")]
    pub frame_width_percent: f64,
    /// Narrowest allowed preview frame.
    #[serde(default = "default_min_window_width")]
    pub min_window_width: f64,
    /// Grab zone at each frame edge that resizes instead of moving.
    #[serde(default = "default_handle_width")]
    pub handle_width: f64,
    /// Space reserved under the main lines for the date labels.
    #[serde(default = "default_x_axis_height")]
    pub x_axis_height: f64,
    /// Approximate width of one date label, used for label density.
    #[serde(default = "default_axis_label_width")]
    pub axis_label_width: f64,
    /// Trailing delay before a legend rebuild after drag input settles.
    #[serde(default = "default_rescale_debounce_ms")]
    pub rescale_debounce_ms: u64,
    /// Duration of the legend enter/exit transition.
    #[serde(default = "default_legend_transition_ms")]
    pub legend_transition_ms: u64,
    /// Distance ticks slide while entering or leaving.
    #[serde(default = "default_legend_slide_px")]
    pub legend_slide_px: f64,
    #[serde(default = "default_tooltip_width")]
    pub tooltip_width: f64,
    /// Gap between the cursor and the tooltip box.
    #[serde(default = "default_tooltip_margin")]
    pub tooltip_margin: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            tick_width: default_tick_width(),
            preview_height: default_preview_height(),
            anchor_count: default_anchor_count(),
            frame_width_percent: default_frame_width_percent(),
            min_window_width: default_min_window_width(),
            handle_width: default_handle_width(),
            x_axis_height: default_x_axis_height(),
            axis_label_width: default_axis_label_width(),
            rescale_debounce_ms: default_rescale_debounce_ms(),
            legend_transition_ms: default_legend_transition_ms(),
            legend_slide_px: default_legend_slide_px(),
            tooltip_width: default_tooltip_width(),
            tooltip_margin: default_tooltip_margin(),
        }
    }
}

impl ChartConfig {
    /// Loads a config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize chart config: {e}"))
        })
    }

    #[must_use]
    pub fn with_tick_width(mut self, tick_width: f64) -> Self {
        self.tick_width = tick_width;
        self
    }

    #[must_use]
    pub fn with_preview_height(mut self, preview_height: f64) -> Self {
        self.preview_height = preview_height;
        self
    }

    #[must_use]
    pub fn with_anchor_count(mut self, anchor_count: usize) -> Self {
        self.anchor_count = anchor_count;
        self
    }

    #[must_use]
    pub fn with_frame_width_percent(mut self, frame_width_percent: f64) -> Self {
        self.frame_width_percent = frame_width_percent;
        self
    }

    #[must_use]
    pub fn with_min_window_width(mut self, min_window_width: f64) -> Self {
        self.min_window_width = min_window_width;
        self
    }

    #[must_use]
    pub fn with_handle_width(mut self, handle_width: f64) -> Self {
        self.handle_width = handle_width;
        self
    }

    #[must_use]
    pub fn with_x_axis_height(mut self, x_axis_height: f64) -> Self {
        self.x_axis_height = x_axis_height;
        self
    }

    #[must_use]
    pub fn with_rescale_debounce_ms(mut self, rescale_debounce_ms: u64) -> Self {
        self.rescale_debounce_ms = rescale_debounce_ms;
        self
    }

    #[must_use]
    pub fn with_legend_transition_ms(mut self, legend_transition_ms: u64) -> Self {
        self.legend_transition_ms = legend_transition_ms;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let positive = [
            ("tick_width", self.tick_width),
            ("axis_label_width", self.axis_label_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let non_negative = [
            ("preview_height", self.preview_height),
            ("min_window_width", self.min_window_width),
            ("handle_width", self.handle_width),
            ("x_axis_height", self.x_axis_height),
            ("legend_slide_px", self.legend_slide_px),
            ("tooltip_width", self.tooltip_width),
            ("tooltip_margin", self.tooltip_margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if !self.frame_width_percent.is_finite()
            || self.frame_width_percent <= 0.0
            || self.frame_width_percent > 100.0
        {
            return Err(ChartError::InvalidConfig(
                "frame_width_percent must be in (0, 100]".to_owned(),
            ));
        }
        if self.anchor_count == 0 {
            return Err(ChartError::InvalidConfig(
                "anchor_count must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_tick_width() -> f64 {
    50.0
}

fn default_preview_height() -> f64 {
    50.0
}

fn default_anchor_count() -> usize {
    5
}

fn default_frame_width_percent() -> f64 {
    35.0
}

fn default_min_window_width() -> f64 {
    30.0
}

fn default_handle_width() -> f64 {
    20.0
}

fn default_x_axis_height() -> f64 {
    30.0
}

fn default_axis_label_width() -> f64 {
    40.0
}

fn default_rescale_debounce_ms() -> u64 {
    120
}

fn default_legend_transition_ms() -> u64 {
    300
}

fn default_legend_slide_px() -> f64 {
    40.0
}

fn default_tooltip_width() -> f64 {
    140.0
}

fn default_tooltip_margin() -> f64 {
    12.0
}
