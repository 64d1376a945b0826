use crate::core::{ScaleUpdate, ViewWindow, ViewportTransforms};
use crate::interaction::DragMode;
use crate::render::Renderer;

use super::{Chart, DateAxis, LegendAnimator, LegendTick, TooltipPayload};

impl<R: Renderer> Chart<R> {
    /// Current preview window, once mounted.
    #[must_use]
    pub fn window(&self) -> Option<ViewWindow> {
        self.core
            .mounted
            .as_ref()
            .map(|mounted| mounted.selector.window())
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.core
            .mounted
            .as_ref()
            .map_or(DragMode::Idle, |mounted| mounted.selector.mode())
    }

    /// Windowed and global scale of the last recomputation.
    #[must_use]
    pub fn scales(&self) -> Option<ScaleUpdate> {
        self.core.mounted.as_ref().map(|mounted| mounted.scales)
    }

    #[must_use]
    pub fn transforms(&self) -> Option<ViewportTransforms> {
        self.core.mounted.as_ref().map(|mounted| mounted.transforms)
    }

    #[must_use]
    pub fn legend(&self) -> Option<&LegendAnimator> {
        self.core.mounted.as_ref().map(|mounted| &mounted.legend)
    }

    /// Baseline plus the active tick set.
    #[must_use]
    pub fn legend_ticks(&self) -> Vec<LegendTick> {
        self.legend().map(LegendAnimator::ticks).unwrap_or_default()
    }

    #[must_use]
    pub fn date_axis(&self) -> Option<&DateAxis> {
        self.core.mounted.as_ref().map(|mounted| &mounted.date_axis)
    }

    /// Payload of the tooltip currently shown.
    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipPayload> {
        self.core
            .mounted
            .as_ref()
            .and_then(|mounted| mounted.hovered.as_ref())
    }
}
