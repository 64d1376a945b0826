use indexmap::IndexMap;

use crate::core::{
    ScaleEngine, ScaleUpdate, SeriesArena, SeriesKey, TimeAxis, ViewportSync,
    ViewportTransforms, Viewport,
};
use crate::interaction::RangeSelector;
use crate::render::Scene;

use super::scene_builder::{ChartLayout, SceneNodes, SeriesRenderState};
use super::{
    ChartConfig, ChartId, DateAxis, DateLabelFormatterFn, LegendAnimator, TaskScheduler,
    TickSlot, TooltipController, TooltipPayload,
};

/// Keys of cancellable timers; scheduling a pending key replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum TaskKey {
    Rescale,
    LegendExit(TickSlot),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum ChartTask {
    /// Debounced legend rebuild after drag input settles.
    Rescale,
    /// Restyle of freshly appended ticks, one frame after the rebuild.
    LegendCommit { generation: u64 },
    /// Teardown of an exited tick set after its transition.
    LegendExitCleanup { slot: TickSlot, generation: u64 },
}

/// Loaded data; immutable apart from the per-series disabled flag.
pub(super) struct ChartData {
    pub(super) time_axis: TimeAxis,
    pub(super) series: SeriesArena,
    /// Virtual X of every sample, cached once.
    pub(super) axis_positions: Vec<f64>,
}

/// Everything that only exists once the chart has a container.
pub(super) struct MountedChart {
    pub(super) scene: Scene,
    pub(super) layout: ChartLayout,
    pub(super) nodes: SceneNodes,
    pub(super) series_nodes: IndexMap<SeriesKey, SeriesRenderState>,
    pub(super) date_axis: DateAxis,
    pub(super) selector: RangeSelector,
    pub(super) scale_engine: ScaleEngine,
    pub(super) viewport_sync: ViewportSync,
    pub(super) legend: LegendAnimator,
    pub(super) tooltip: TooltipController,
    pub(super) scheduler: TaskScheduler<TaskKey, ChartTask>,
    pub(super) transforms: ViewportTransforms,
    pub(super) scales: ScaleUpdate,
    pub(super) hovered: Option<TooltipPayload>,
    /// Last hover position, replayed when the data under it changes.
    pub(super) hover_x: Option<f64>,
}

/// Internal state behind the public [`super::Chart`] facade.
pub(super) struct ChartCore {
    pub(super) id: ChartId,
    pub(super) title: String,
    pub(super) config: ChartConfig,
    pub(super) container: Option<Viewport>,
    pub(super) data: ChartData,
    pub(super) axis_formatter: DateLabelFormatterFn,
    pub(super) tooltip_formatter: DateLabelFormatterFn,
    pub(super) mounted: Option<MountedChart>,
}
