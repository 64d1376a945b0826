use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::data_set::SeriesArena;
use crate::core::primitives::{SCALE_PRECISION_DP, round_to_decimals};
use crate::core::{ValueBounds, ViewWindow};

/// Transition direction of the Y scale relative to the previously stored scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleDirection {
    /// Scale shrank: more data units per pixel.
    In,
    /// Scale grew: fewer data units per pixel.
    Out,
    #[default]
    None,
}

impl ScaleDirection {
    #[must_use]
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Self::Out
        } else if current < previous {
            Self::In
        } else {
            Self::None
        }
    }
}

/// Y scale (pixels per data unit) plus the bounds and direction that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScaleState {
    pub scale: f64,
    pub direction: ScaleDirection,
    pub bounds: Option<ValueBounds>,
}

impl ScaleState {
    /// Terminal empty state: nothing enabled, or nothing above the zero baseline.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.scale == 0.0
    }
}

/// Both scale variants after one recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScaleUpdate {
    /// Fitted to the visible sub-range; drives the main view and legend.
    pub windowed: ScaleState,
    /// Fitted to the full series; drives the static preview strip.
    pub global: ScaleState,
}

/// Pixels-per-unit for a baseline-anchored view of `max`, rounded to the stored precision.
#[must_use]
pub fn scale_for_max(visible_height: f64, max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 || visible_height <= 0.0 {
        return 0.0;
    }
    round_to_decimals(visible_height / max, SCALE_PRECISION_DP)
}

/// Reduces enabled series to overall bounds over `[from, to)`.
///
/// Ranges are clamped per series so a short series contributes what it has.
#[must_use]
pub fn enabled_bounds(series: &SeriesArena, from: usize, to: usize) -> Option<ValueBounds> {
    series
        .values()
        .filter(|line| line.is_enabled())
        .filter_map(|line| {
            let end = to.min(line.len());
            let start = from.min(end);
            match line.get_min_max_value(start, end) {
                Ok(bounds) => bounds,
                Err(err) => {
                    warn!(series = %line.key(), error = %err, "skipping series bounds");
                    None
                }
            }
        })
        .reduce(ValueBounds::union)
}

/// Computes windowed and global Y scales and tracks their previous values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleEngine {
    visible_height: f64,
    previous_windowed: Option<f64>,
    previous_global: Option<f64>,
}

impl ScaleEngine {
    #[must_use]
    pub fn new(visible_height: f64) -> Self {
        Self {
            visible_height: visible_height.max(0.0),
            previous_windowed: None,
            previous_global: None,
        }
    }

    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.visible_height
    }

    /// Last windowed scale, if any was computed.
    #[must_use]
    pub fn current_scale(&self) -> Option<f64> {
        self.previous_windowed
    }

    /// Windowed scale for the visible sub-range of `len` samples.
    pub fn compute_scale(
        &mut self,
        window: ViewWindow,
        series: &SeriesArena,
        len: usize,
    ) -> ScaleState {
        let (from, to) = window.index_bounds(len);
        let bounds = enabled_bounds(series, from, to);
        let state = self.resolve(bounds, self.previous_windowed);
        self.previous_windowed = Some(state.scale);
        trace!(from, to, scale = state.scale, direction = ?state.direction, "windowed scale");
        state
    }

    /// Global scale over every sample of the enabled series.
    pub fn compute_global_scale(&mut self, series: &SeriesArena) -> ScaleState {
        let bounds = series
            .values()
            .filter(|line| line.is_enabled() && !line.is_empty())
            .map(|line| ValueBounds {
                min: line.values().iter().copied().fold(f64::INFINITY, f64::min),
                max: line.max_value(),
            })
            .reduce(ValueBounds::union);
        let state = self.resolve(bounds, self.previous_global);
        self.previous_global = Some(state.scale);
        state
    }

    /// Recomputes both variants; called on every window or visibility change.
    pub fn update(&mut self, window: ViewWindow, series: &SeriesArena, len: usize) -> ScaleUpdate {
        ScaleUpdate {
            windowed: self.compute_scale(window, series, len),
            global: self.compute_global_scale(series),
        }
    }

    fn resolve(&self, bounds: Option<ValueBounds>, previous: Option<f64>) -> ScaleState {
        let max = bounds.map_or(0.0, |bounds| bounds.max);
        let scale = scale_for_max(self.visible_height, max);
        let direction = previous.map_or(ScaleDirection::None, |previous| {
            ScaleDirection::between(previous, scale)
        });
        ScaleState {
            scale,
            direction,
            bounds,
        }
    }
}
