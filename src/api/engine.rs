use crate::core::{SeriesArena, TimeAxis, Viewport};
use crate::error::ChartResult;
use crate::render::{Renderer, Scene};

use super::{ChartConfig, ChartId, ChartLayout, engine_core::ChartCore};

/// Main orchestration facade consumed by host applications.
///
/// `Chart` keeps the preview window, main view, Y legend, date axis and
/// tooltip consistent, and hands the resulting scene to its renderer.
pub struct Chart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: ChartCore,
}

impl<R: Renderer> Chart<R> {
    #[must_use]
    pub fn id(&self) -> &ChartId {
        &self.core.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.core.title
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.core.config
    }

    #[must_use]
    pub fn container(&self) -> Option<Viewport> {
        self.core.container
    }

    #[must_use]
    pub fn time_axis(&self) -> &TimeAxis {
        &self.core.data.time_axis
    }

    #[must_use]
    pub fn series(&self) -> &SeriesArena {
        &self.core.data.series
    }

    /// `true` once a container was available and the scene was built.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.core.mounted.is_some()
    }

    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.core.mounted.as_ref().map(|mounted| &mounted.scene)
    }

    #[must_use]
    pub fn layout(&self) -> Option<ChartLayout> {
        self.core.mounted.as_ref().map(|mounted| mounted.layout)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mounts the scene on first use and hands it to the renderer.
    ///
    /// Without a container this is a logged no-op.
    pub fn render(&mut self) -> ChartResult<()> {
        if !self.ensure_mounted()? {
            return Ok(());
        }
        match &self.core.mounted {
            Some(mounted) => self.renderer.render(&mounted.scene),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
