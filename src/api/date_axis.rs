use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::TimeAxis;

pub type DateLabelFormatterFn = Arc<dyn Fn(i64) -> String + Send + Sync + 'static>;

/// `Jan 7` style label used under the main view.
#[must_use]
pub fn default_axis_date_label(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map_or_else(|| timestamp_ms.to_string(), |time| time.format("%b %-d").to_string())
}

/// `Sat, Jan 7` style label used in the tooltip header.
#[must_use]
pub fn default_tooltip_date_label(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |time| time.format("%a, %b %-d").to_string(),
    )
}

/// One X-axis label, formatted once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateLabel {
    pub timestamp_ms: i64,
    pub text: String,
    /// Position inside the label strip, in percent of its width.
    pub position_percent: f64,
    pub visible: bool,
}

/// X-axis label strip kept pixel-aligned with the main view.
///
/// The strip is stretched to the zoomed virtual width and shifted left by the
/// pan offset; label density is thinned in powers of two counted from the
/// newest label so labels stay put while zooming.
#[derive(Debug, Clone, PartialEq)]
pub struct DateAxis {
    labels: Vec<DateLabel>,
    label_width: f64,
    container_width: Option<f64>,
    offset_left: f64,
    max_labels_to_show: Option<usize>,
    step: usize,
}

impl DateAxis {
    #[must_use]
    pub fn new(time_axis: &TimeAxis, label_width: f64, formatter: &DateLabelFormatterFn) -> Self {
        // Label i sits where sample i is drawn: i / (N - 1) of the virtual width.
        let count = time_axis.len();
        let spacing = if count > 1 {
            100.0 / (count - 1) as f64
        } else {
            0.0
        };
        let labels = time_axis
            .timestamps()
            .iter()
            .enumerate()
            .map(|(index, &timestamp_ms)| DateLabel {
                timestamp_ms,
                text: formatter(timestamp_ms),
                position_percent: spacing * index as f64,
                visible: false,
            })
            .collect();

        Self {
            labels,
            label_width,
            container_width: None,
            offset_left: 0.0,
            max_labels_to_show: None,
            step: 1,
        }
    }

    #[must_use]
    pub fn labels(&self) -> &[DateLabel] {
        &self.labels
    }

    pub fn visible_labels(&self) -> impl Iterator<Item = &DateLabel> {
        self.labels.iter().filter(|label| label.visible)
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width.unwrap_or(0.0)
    }

    #[must_use]
    pub fn offset_left(&self) -> f64 {
        self.offset_left
    }

    /// Current thinning step: every `step`-th label counted from the newest is shown.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Screen X of a label for the current width and offset.
    #[must_use]
    pub fn label_x(&self, label: &DateLabel) -> f64 {
        label.position_percent / 100.0 * self.container_width() - self.offset_left
    }

    /// Stretches the strip and recomputes label density.
    ///
    /// Returns `true` when label visibility changed.
    pub fn set_width(&mut self, width: f64) -> bool {
        if self.container_width == Some(width) {
            return false;
        }
        self.container_width = Some(width);

        let max_labels = ((width / (self.label_width * 1.5)).floor().max(1.0)) as usize;
        if self.max_labels_to_show == Some(max_labels) {
            return false;
        }
        self.max_labels_to_show = Some(max_labels);

        let count = self.labels.len();
        let mut step = 2;
        while (step as f64) < count as f64 / max_labels as f64 {
            step *= 2;
        }
        self.step = step;

        for (index, label) in self.labels.iter_mut().enumerate() {
            let from_newest = count - 1 - index;
            label.visible = from_newest == count - 1 || from_newest % step == 0;
        }
        trace!(width, max_labels, step, "date axis density");
        true
    }

    pub fn set_left(&mut self, offset_left: f64) {
        self.offset_left = offset_left;
    }
}
