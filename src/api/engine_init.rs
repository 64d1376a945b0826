use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{DataSet, ScaleEngine, ScaleUpdate, ViewWindow, ViewportSync};
use crate::error::{ChartError, ChartResult};
use crate::interaction::RangeSelector;
use crate::render::Renderer;

use super::engine_core::{ChartCore, ChartData, MountedChart};
use super::scale_coordinator::RescaleTiming;
use super::scene_builder::{ChartLayout, build_scene};
use super::{
    Chart, ChartId, ChartOptions, DateAxis, DateLabelFormatterFn, LegendAnimator, TaskScheduler,
    TooltipController, default_axis_date_label, default_tooltip_date_label,
};

impl<R: Renderer> Chart<R> {
    /// Creates a chart over `data`.
    ///
    /// When the options carry a container the scene is built immediately, so
    /// an undersized container fails here rather than on first render.
    pub fn new(renderer: R, data: DataSet, options: ChartOptions) -> ChartResult<Self> {
        options.config.validate()?;
        let id = options.id.unwrap_or_else(ChartId::next);
        let title = options.title.unwrap_or_else(|| id.to_string());
        let (time_axis, series) = data.into_parts();
        let axis_positions = time_axis.pixel_positions(options.config.tick_width);

        let mut chart = Self {
            renderer,
            core: ChartCore {
                id,
                title,
                config: options.config,
                container: options.container,
                data: ChartData {
                    time_axis,
                    series,
                    axis_positions,
                },
                axis_formatter: Arc::new(default_axis_date_label),
                tooltip_formatter: Arc::new(default_tooltip_date_label),
                mounted: None,
            },
        };
        chart.ensure_mounted()?;
        debug!(
            id = %chart.core.id,
            samples = chart.core.data.time_axis.len(),
            series = chart.core.data.series.len(),
            mounted = chart.is_mounted(),
            "chart created"
        );
        Ok(chart)
    }

    /// Replaces the X-axis label formatter. Labels are formatted once, so a
    /// mounted chart rebuilds its scene.
    pub fn set_axis_date_formatter(&mut self, formatter: DateLabelFormatterFn) -> ChartResult<()> {
        self.core.axis_formatter = formatter;
        self.remount()
    }

    /// Replaces the tooltip header formatter.
    pub fn set_tooltip_date_formatter(&mut self, formatter: DateLabelFormatterFn) {
        self.core.tooltip_formatter = formatter;
        if let Some(x) = self.core.mounted.as_ref().and_then(|mounted| mounted.hover_x) {
            self.hover(x);
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> ChartResult<()> {
        self.core.title = title.into();
        if let Some(mounted) = &mut self.core.mounted {
            mounted
                .scene
                .set_text(mounted.nodes.title, self.core.title.clone())?;
        }
        Ok(())
    }

    /// Builds the scene if a container is known. Returns `true` when mounted.
    pub(super) fn ensure_mounted(&mut self) -> ChartResult<bool> {
        if self.core.mounted.is_some() {
            return Ok(true);
        }
        if self.core.container.is_none() {
            warn!(id = %self.core.id, "chart has no container; render skipped");
            return Ok(false);
        }
        self.core.mounted = Some(mount(&self.core, None)?);
        Ok(true)
    }

    /// Drops the current scene and builds a fresh one, keeping the window
    /// proportions and the disabled-series set.
    pub(super) fn remount(&mut self) -> ChartResult<()> {
        let Some(container) = self.core.container else {
            return Ok(());
        };
        let previous = self.core.mounted.take().map(|mut mounted| {
            (
                mounted.selector.resize(container.width),
                mounted.scheduler.now_ms(),
            )
        });
        self.core.mounted = Some(mount(&self.core, previous)?);
        Ok(())
    }
}

/// `previous` carries the window and frame clock of a scene being replaced.
fn mount(core: &ChartCore, previous: Option<(ViewWindow, u64)>) -> ChartResult<MountedChart> {
    let Some(container) = core.container else {
        return Err(ChartError::InvalidViewport {
            width: 0.0,
            height: 0.0,
        });
    };
    let config = &core.config;
    let layout = ChartLayout::resolve(container, config)?;
    let total_chart_width = core.data.time_axis.total_width(config.tick_width);

    let date_axis = DateAxis::new(
        &core.data.time_axis,
        config.axis_label_width,
        &core.axis_formatter,
    );
    let built = build_scene(
        &layout,
        &core.title,
        total_chart_width,
        &core.data.series,
        &date_axis,
    )?;
    let mut scene = built.scene;
    let legend = LegendAnimator::mount(
        &mut scene,
        built.nodes.legend,
        layout.width,
        layout.visible_height,
        config.anchor_count,
        config.legend_slide_px,
    )?;

    let (window, now_ms) = previous.unwrap_or_else(|| {
        (
            ViewWindow::anchored_right(layout.width, config.frame_width_percent),
            0,
        )
    });
    let selector = RangeSelector::new(window, config.min_window_width, config.handle_width)?;
    let viewport_sync = ViewportSync::new(total_chart_width, layout.chart_height);

    let mut mounted = MountedChart {
        scene,
        layout,
        nodes: built.nodes,
        series_nodes: built.series,
        date_axis,
        transforms: viewport_sync.sync(selector.window()),
        selector,
        scale_engine: ScaleEngine::new(layout.visible_height),
        viewport_sync,
        legend,
        tooltip: TooltipController::new(
            config.tick_width,
            layout.width,
            config.tooltip_width,
            config.tooltip_margin,
        ),
        scheduler: TaskScheduler::starting_at(now_ms),
        scales: ScaleUpdate::default(),
        hovered: None,
        hover_x: None,
    };
    mounted.apply_window(&core.data, config, RescaleTiming::Immediate)?;
    debug!(
        id = %core.id,
        width = layout.width,
        height = layout.height,
        left = window.left,
        right = window.right,
        "chart mounted"
    );
    Ok(mounted)
}
