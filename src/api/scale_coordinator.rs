use tracing::{debug, trace, warn};

use crate::core::{Series, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{NodeId, Renderer, Scene};

use super::engine_core::{ChartData, ChartTask, MountedChart, TaskKey};
use super::scene_builder::{ChartLayout, place_preview_frame};
use super::{Chart, ChartConfig};

/// When the legend follows a window change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RescaleTiming {
    Immediate,
    /// Trailing-edge rebuild once drag input settles.
    Debounced,
}

impl MountedChart {
    /// Propagates the selector's window to every dependent view.
    ///
    /// View boxes, date labels, the preview frame and the lines follow on
    /// every call; the legend rebuild follows `timing`.
    pub(super) fn apply_window(
        &mut self,
        data: &ChartData,
        config: &ChartConfig,
        timing: RescaleTiming,
    ) -> ChartResult<()> {
        let window = self.selector.window();
        self.transforms = self.viewport_sync.sync(window);
        self.scene
            .set_view_box(self.nodes.main_canvas, self.transforms.main)?;
        self.scene
            .set_view_box(self.nodes.preview_canvas, self.transforms.preview)?;
        self.sync_date_axis()?;
        place_preview_frame(
            &mut self.scene,
            &self.nodes.preview_frame,
            window,
            self.layout.preview_height,
        )?;

        self.scales = self
            .scale_engine
            .update(window, &data.series, data.time_axis.len());
        self.redraw_lines(data)?;

        match timing {
            RescaleTiming::Immediate => self.rescale_legend(),
            RescaleTiming::Debounced => {
                self.scheduler.schedule(
                    TaskKey::Rescale,
                    config.rescale_debounce_ms,
                    ChartTask::Rescale,
                );
                Ok(())
            }
        }
    }

    fn sync_date_axis(&mut self) -> ChartResult<()> {
        let placement = self.transforms.axis;
        let density_changed = self.date_axis.set_width(placement.container_width);
        self.date_axis.set_left(placement.offset_left);

        for (label, node) in self.date_axis.labels().iter().zip(&self.nodes.date_labels) {
            if density_changed {
                self.scene.set_visible(*node, label.visible)?;
            }
            if label.visible {
                self.scene
                    .set_offset(*node, self.date_axis.label_x(label), 0.0)?;
            }
        }
        if density_changed {
            trace!(step = self.date_axis.step(), "date labels thinned");
        }
        Ok(())
    }

    /// Regenerates main paths for the windowed scale and preview paths for
    /// the global scale. Paths whose scale did not change are kept.
    pub(super) fn redraw_lines(&mut self, data: &ChartData) -> ChartResult<()> {
        let height = self.layout.visible_height;
        let windowed = self.scales.windowed.scale;
        let global = self.scales.global.scale;

        for (key, line) in &data.series {
            let Some(state) = self.series_nodes.get_mut(key) else {
                continue;
            };
            let targets = [
                (state.main_path, windowed, &mut state.main_scale),
                (state.preview_path, global, &mut state.preview_scale),
            ];
            for (node, scale, cached) in targets {
                draw_line(
                    &mut self.scene,
                    node,
                    line,
                    &data.axis_positions,
                    height,
                    scale,
                    cached,
                )?;
            }
        }
        Ok(())
    }

    /// Rebuilds the legend for the current windowed scale, superseding any
    /// pending debounced rebuild. The restyle runs on the next frame.
    pub(super) fn rescale_legend(&mut self) -> ChartResult<()> {
        self.scheduler.cancel(TaskKey::Rescale);
        let scale = self.scales.windowed.scale;
        if let Some(transition) = self.legend.rebuild(&mut self.scene, scale)? {
            self.scheduler
                .cancel(TaskKey::LegendExit(transition.entering));
            self.scheduler.request_frame(ChartTask::LegendCommit {
                generation: transition.generation,
            });
        }
        Ok(())
    }

    pub(super) fn run_task(&mut self, task: ChartTask, config: &ChartConfig) -> ChartResult<()> {
        match task {
            ChartTask::Rescale => self.rescale_legend(),
            ChartTask::LegendCommit { generation } => {
                if let Some(slot) = self.legend.commit(&mut self.scene, generation)? {
                    self.scheduler.schedule(
                        TaskKey::LegendExit(slot),
                        config.legend_transition_ms,
                        ChartTask::LegendExitCleanup { slot, generation },
                    );
                }
                Ok(())
            }
            ChartTask::LegendExitCleanup { slot, generation } => {
                self.legend.finish_exit(&mut self.scene, slot, generation)?;
                Ok(())
            }
        }
    }
}

fn draw_line(
    scene: &mut Scene,
    node: NodeId,
    line: &Series,
    axis: &[f64],
    height: f64,
    scale: f64,
    cached: &mut Option<f64>,
) -> ChartResult<()> {
    if scale <= 0.0 {
        scene.set_visible(node, false)?;
        return Ok(());
    }
    scene.set_visible(node, true)?;

    let enabled = line.is_enabled();
    scene.toggle_class(node, "c-opaque", !enabled)?;
    scene.set_opacity(node, if enabled { 1.0 } else { 0.0 })?;
    if enabled && *cached != Some(scale) {
        let path = line.generate_path(axis, height, scale, 0.0);
        scene.set_path_data(node, path.to_svg_path_data())?;
        *cached = Some(scale);
    }
    Ok(())
}

impl<R: Renderer> Chart<R> {
    /// Paint frame driven by the host clock.
    ///
    /// Runs frame tasks queued before the call, then timers due at `now_ms`.
    /// Returns the number of tasks run.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let config = self.core.config;
        let Some(mounted) = &mut self.core.mounted else {
            return 0;
        };
        let tasks = mounted.scheduler.advance_to(now_ms);
        let count = tasks.len();
        for task in tasks {
            if let Err(err) = mounted.run_task(task, &config) {
                warn!(?task, error = %err, "chart task failed");
            }
        }
        count
    }

    /// `true` while a frame task or timer is waiting for [`Chart::advance_to`].
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.core.mounted.as_ref().is_some_and(|mounted| {
            mounted.scheduler.has_frame_tasks() || mounted.scheduler.pending_timers() > 0
        })
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.core
            .mounted
            .as_ref()
            .and_then(|mounted| mounted.scheduler.next_due_ms())
    }

    /// Adopts a new container size.
    ///
    /// The preview window keeps its proportions; pending transitions are
    /// dropped with the old scene. A container too small for the layout is
    /// rejected and the current scene is kept.
    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<()> {
        let container = Viewport::new(width, height);
        if !container.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        if self.core.container == Some(container) && self.core.mounted.is_some() {
            return Ok(());
        }
        ChartLayout::resolve(container, &self.core.config)?;
        self.core.container = Some(container);
        debug!(id = %self.core.id, width, height, "chart resized");
        if self.core.mounted.is_some() {
            self.remount()
        } else {
            self.ensure_mounted().map(|_| ())
        }
    }
}
