use tracing::{trace, warn};

use crate::error::ChartResult;
use crate::interaction::{DragInput, DragMode, DragOutcome, DragSide};
use crate::render::{NodeKind, Renderer};

use super::engine_core::{ChartData, MountedChart};
use super::scale_coordinator::RescaleTiming;
use super::scene_builder::{tooltip_guide, tooltip_panel, tooltip_text_y};
use super::{Chart, ChartConfig, DateLabelFormatterFn, TooltipPayload};

const TOOLTIP_TEXT_INSET_PX: f64 = 8.0;

impl MountedChart {
    fn finish_drag_step(
        &mut self,
        outcome: DragOutcome,
        data: &ChartData,
        config: &ChartConfig,
    ) -> DragOutcome {
        if let DragOutcome::Updated(_) = outcome {
            self.hover_x = None;
            if let Err(err) = self
                .apply_window(data, config, RescaleTiming::Debounced)
                .and_then(|()| self.hide_tooltip())
            {
                warn!(error = %err, "failed to apply preview window");
            }
        }
        outcome
    }

    /// Redraws the hover overlay for the stored hover position.
    pub(super) fn update_tooltip(
        &mut self,
        data: &ChartData,
        formatter: &DateLabelFormatterFn,
    ) -> ChartResult<()> {
        let Some(pixel_x) = self.hover_x else {
            return self.hide_tooltip();
        };
        let payload = self.tooltip.resolve(
            pixel_x,
            self.transforms.main,
            &data.time_axis,
            &data.series,
            self.scales.windowed.scale,
            self.layout.visible_height,
            formatter,
        );
        match payload {
            Some(payload) => {
                self.draw_tooltip(&payload)?;
                self.hovered = Some(payload);
                Ok(())
            }
            None => self.hide_tooltip(),
        }
    }

    fn draw_tooltip(&mut self, payload: &TooltipPayload) -> ChartResult<()> {
        let nodes = self.nodes.tooltip;
        let scene = &mut self.scene;
        let text_x = payload.box_x + TOOLTIP_TEXT_INSET_PX;

        scene.set_visible(nodes.group, true)?;
        scene.set_kind(
            nodes.guide,
            NodeKind::Line(tooltip_guide(payload.guide_x, self.layout.visible_height)),
        )?;
        scene.set_kind(
            nodes.panel,
            NodeKind::Rect(tooltip_panel(
                payload.box_x,
                self.tooltip.box_width(),
                payload.entries.len(),
            )),
        )?;
        scene.set_text(nodes.date, payload.date_label.clone())?;
        scene.set_offset(nodes.date, text_x, tooltip_text_y(0))?;

        for (key, state) in &self.series_nodes {
            let row = payload.entries.iter().position(|entry| entry.key == *key);
            let Some(row) = row else {
                scene.set_visible(state.tooltip_marker, false)?;
                scene.set_visible(state.tooltip_row, false)?;
                continue;
            };
            let entry = &payload.entries[row];
            scene.set_visible(state.tooltip_marker, true)?;
            scene.set_offset(state.tooltip_marker, entry.marker_x, entry.marker_y)?;
            scene.set_visible(state.tooltip_row, true)?;
            scene.set_text(state.tooltip_row, format!("{} {}", entry.name, entry.value))?;
            scene.set_offset(state.tooltip_row, text_x, tooltip_text_y(row + 1))?;
        }
        trace!(index = payload.index, side = ?payload.side, "tooltip shown");
        Ok(())
    }

    pub(super) fn hide_tooltip(&mut self) -> ChartResult<()> {
        self.hovered = None;
        self.scene.set_visible(self.nodes.tooltip.group, false)
    }
}

impl<R: Renderer> Chart<R> {
    /// Starts a drag at `x` (preview-strip pixels) if it lands inside the frame.
    pub fn pointer_down(&mut self, x: f64) -> Option<DragSide> {
        self.core
            .mounted
            .as_mut()
            .and_then(|mounted| mounted.selector.pointer_down(x))
    }

    /// Feeds a pointer move into the active drag.
    ///
    /// Accepted moves pan/zoom the main view and redraw the lines at once;
    /// the legend follows after `rescale_debounce_ms` of inactivity.
    pub fn pointer_move(&mut self, x: f64) -> DragOutcome {
        let core = &mut self.core;
        let Some(mounted) = &mut core.mounted else {
            return DragOutcome::Idle;
        };
        let outcome = mounted.selector.pointer_move(x);
        mounted.finish_drag_step(outcome, &core.data, &core.config)
    }

    /// Starts a drag on `side` and applies `input` in one step, for hosts
    /// whose gesture layer already resolved the grabbed part.
    ///
    /// While a drag is active, `side` must match the grabbed part; a
    /// different side is rejected and leaves the window untouched.
    pub fn apply_drag(&mut self, side: DragSide, input: DragInput) -> DragOutcome {
        let core = &mut self.core;
        let Some(mounted) = &mut core.mounted else {
            return DragOutcome::Idle;
        };
        match mounted.selector.mode() {
            DragMode::Idle => {
                mounted.selector.begin_drag(side, input.start_position_x);
            }
            DragMode::Dragging(active) if active != side => {
                trace!(?active, requested = ?side, "drag side mismatch");
                return DragOutcome::Rejected;
            }
            DragMode::Dragging(_) => {}
        }
        let outcome = mounted.selector.apply_drag(input);
        mounted.finish_drag_step(outcome, &core.data, &core.config)
    }

    /// Ends the active drag. Host applications forward document-level releases here.
    pub fn pointer_up(&mut self) -> bool {
        self.core
            .mounted
            .as_mut()
            .is_some_and(|mounted| mounted.selector.pointer_up())
    }

    /// Shows the tooltip for the sample nearest to `x` (main-view pixels).
    pub fn hover(&mut self, x: f64) -> Option<TooltipPayload> {
        let core = &mut self.core;
        let mounted = core.mounted.as_mut()?;
        mounted.hover_x = Some(x);
        if let Err(err) = mounted.update_tooltip(&core.data, &core.tooltip_formatter) {
            warn!(error = %err, "failed to draw tooltip");
        }
        mounted.hovered.clone()
    }

    pub fn hover_leave(&mut self) {
        if let Some(mounted) = &mut self.core.mounted {
            mounted.hover_x = None;
            if let Err(err) = mounted.hide_tooltip() {
                warn!(error = %err, "failed to hide tooltip");
            }
        }
    }
}
