use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::format_svg_number;
use crate::error::{ChartError, ChartResult};

/// Stable identifier of a series: the column id of the input data (`"y0"`, `"y1"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey(String);

impl SeriesKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Inclusive value bounds over a run of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// One named line series. Values are immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    key: SeriesKey,
    name: String,
    color: String,
    values: Vec<f64>,
    max_value: f64,
    disabled: bool,
}

impl Series {
    pub fn new(
        key: SeriesKey,
        name: impl Into<String>,
        color: impl Into<String>,
        values: Vec<f64>,
    ) -> ChartResult<Self> {
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "series `{key}` has a non-finite value at sample {index}"
            )));
        }
        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max_value = if max_value.is_finite() { max_value } else { 0.0 };

        Ok(Self {
            key,
            name: name.into(),
            color: color.into(),
            values,
            max_value,
            disabled: false,
        })
    }

    #[must_use]
    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Maximum over all samples, cached at construction.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Returns `(min, max)` over `values[start..end]`, or `None` for an empty range.
    pub fn get_min_max_value(&self, start: usize, end: usize) -> ChartResult<Option<ValueBounds>> {
        if start > end || end > self.values.len() {
            return Err(ChartError::InvalidData(format!(
                "range {start}..{end} is outside series `{}` of length {}",
                self.key,
                self.values.len()
            )));
        }

        let bounds = self.values[start..end]
            .iter()
            .fold(None, |acc: Option<ValueBounds>, &value| {
                let sample = ValueBounds {
                    min: value,
                    max: value,
                };
                Some(acc.map_or(sample, |acc| acc.union(sample)))
            });
        Ok(bounds)
    }

    /// Maps samples to pixel space: `y = height - (value - base_value) * scale`.
    ///
    /// A length mismatch between `axis` and the values is a data-shape problem,
    /// not a failure: it is logged and the shorter length wins.
    #[must_use]
    pub fn generate_path(
        &self,
        axis: &[f64],
        height: f64,
        scale: f64,
        base_value: f64,
    ) -> SeriesPath {
        if axis.len() != self.values.len() {
            warn!(
                series = %self.key,
                axis_len = axis.len(),
                values_len = self.values.len(),
                "x axis has incorrect size"
            );
        }

        let points = axis
            .iter()
            .zip(&self.values)
            .map(|(&x, &value)| (x, height - (value - base_value) * scale))
            .collect();
        SeriesPath { points }
    }
}

/// Pixel-space polyline for one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesPath {
    pub points: Vec<(f64, f64)>,
}

impl SeriesPath {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG path data: `M x,y x,y ...`.
    #[must_use]
    pub fn to_svg_path_data(&self) -> String {
        if self.points.is_empty() {
            return String::new();
        }
        let body = self
            .points
            .iter()
            .map(|&(x, y)| format!("{},{}", format_svg_number(x), format_svg_number(y)))
            .collect::<Vec<_>>()
            .join(" ");
        format!("M{body}")
    }
}
