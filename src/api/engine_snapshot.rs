use serde::{Deserialize, Serialize};

use crate::core::{ScaleUpdate, SeriesKey, ViewWindow, ViewportTransforms};
use crate::interaction::DragMode;
use crate::render::Renderer;

use super::{Chart, ChartId, LegendTick, TickSlot, TooltipPayload};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling. Not a persistence format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub id: ChartId,
    pub title: String,
    pub mounted: bool,
    pub window: Option<ViewWindow>,
    pub drag_mode: DragMode,
    pub transforms: Option<ViewportTransforms>,
    pub scales: Option<ScaleUpdate>,
    pub enabled_series: Vec<SeriesKey>,
    pub disabled_series: Vec<SeriesKey>,
    pub legend_active_slot: Option<TickSlot>,
    pub legend_ticks: Vec<LegendTick>,
    pub visible_date_labels: Vec<String>,
    pub tooltip: Option<TooltipPayload>,
    pub pending_timers: usize,
}

impl<R: Renderer> Chart<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let mounted = self.core.mounted.as_ref();
        let (enabled_series, disabled_series) = self
            .core
            .data
            .series
            .values()
            .map(|line| (line.key().clone(), line.is_enabled()))
            .fold((Vec::new(), Vec::new()), |(mut on, mut off), (key, enabled)| {
                if enabled {
                    on.push(key);
                } else {
                    off.push(key);
                }
                (on, off)
            });

        ChartSnapshot {
            id: self.core.id.clone(),
            title: self.core.title.clone(),
            mounted: mounted.is_some(),
            window: self.window(),
            drag_mode: self.drag_mode(),
            transforms: self.transforms(),
            scales: self.scales(),
            enabled_series,
            disabled_series,
            legend_active_slot: mounted.map(|mounted| mounted.legend.active_slot()),
            legend_ticks: self.legend_ticks(),
            visible_date_labels: mounted
                .map(|mounted| {
                    mounted
                        .date_axis
                        .visible_labels()
                        .map(|label| label.text.clone())
                        .collect()
                })
                .unwrap_or_default(),
            tooltip: self.tooltip().cloned(),
            pending_timers: mounted.map_or(0, |mounted| mounted.scheduler.pending_timers()),
        }
    }
}
