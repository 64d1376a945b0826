use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Shared X axis: strictly increasing sample timestamps in unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    timestamps: Vec<i64>,
}

impl TimeAxis {
    pub fn new(timestamps: Vec<i64>) -> ChartResult<Self> {
        if timestamps.len() < 2 {
            return Err(ChartError::InvalidData(
                "time axis needs at least two samples".to_owned(),
            ));
        }
        if let Some(index) = timestamps.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ChartError::InvalidData(format!(
                "time axis must be strictly increasing (sample {} <= sample {})",
                index + 1,
                index
            )));
        }
        Ok(Self { timestamps })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    #[must_use]
    pub fn timestamp(&self, index: usize) -> Option<i64> {
        self.timestamps.get(index).copied()
    }

    /// Milliseconds between the first and last sample.
    #[must_use]
    pub fn span_millis(&self) -> i64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        }
    }

    /// Virtual X coordinate of every sample: `index * tick_width`.
    #[must_use]
    pub fn pixel_positions(&self, tick_width: f64) -> Vec<f64> {
        (0..self.timestamps.len())
            .map(|index| index as f64 * tick_width)
            .collect()
    }

    /// Width of the virtual chart canvas.
    #[must_use]
    pub fn total_width(&self, tick_width: f64) -> f64 {
        tick_width * self.timestamps.len().saturating_sub(1) as f64
    }
}
