use tracing::{debug, warn};

use crate::core::SeriesKey;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::engine_core::{ChartData, MountedChart};
use super::scene_builder::{BUTTON_MASK_DISABLED, BUTTON_MASK_ENABLED};
use super::{Chart, DateLabelFormatterFn};

impl MountedChart {
    /// Re-enters the pipeline at the scale engine after a visibility change.
    ///
    /// The legend is rebuilt immediately, superseding a pending drag rescale.
    fn apply_visibility(
        &mut self,
        data: &ChartData,
        formatter: &DateLabelFormatterFn,
        key: &SeriesKey,
    ) -> ChartResult<()> {
        if let (Some(state), Some(line)) = (self.series_nodes.get(key), data.series.get(key)) {
            let radius = if line.is_disabled() {
                BUTTON_MASK_DISABLED
            } else {
                BUTTON_MASK_ENABLED
            };
            self.scene.set_circle_radius(state.button_mask, radius)?;
            self.scene
                .toggle_class(state.button, "c-button-off", line.is_disabled())?;
        }

        let window = self.selector.window();
        self.scales = self
            .scale_engine
            .update(window, &data.series, data.time_axis.len());
        self.redraw_lines(data)?;
        self.rescale_legend()?;
        self.update_tooltip(data, formatter)
    }
}

impl<R: Renderer> Chart<R> {
    /// Flips a series between enabled and disabled. Returns the new enabled state.
    pub fn toggle_series(&mut self, key: &str) -> ChartResult<bool> {
        let key = SeriesKey::new(key);
        let enabled = self
            .core
            .data
            .series
            .get(&key)
            .map(|line| line.is_enabled())
            .ok_or_else(|| ChartError::UnknownSeries(key.to_string()))?;
        self.set_series_enabled(&key, !enabled)?;
        Ok(!enabled)
    }

    pub fn set_series_enabled(&mut self, key: &SeriesKey, enabled: bool) -> ChartResult<()> {
        let core = &mut self.core;
        let line = core
            .data
            .series
            .get_mut(key)
            .ok_or_else(|| ChartError::UnknownSeries(key.to_string()))?;
        if line.is_enabled() == enabled {
            return Ok(());
        }
        line.set_disabled(!enabled);
        debug!(series = %key, enabled, "series visibility changed");

        if let Some(mounted) = &mut core.mounted {
            if let Err(err) = mounted.apply_visibility(&core.data, &core.tooltip_formatter, key) {
                warn!(series = %key, error = %err, "failed to apply series visibility");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_series_enabled(&self, key: &str) -> Option<bool> {
        self.core
            .data
            .series
            .get(&SeriesKey::new(key))
            .map(|line| line.is_enabled())
    }

    /// Keys of enabled series, in input order.
    #[must_use]
    pub fn enabled_keys(&self) -> Vec<SeriesKey> {
        self.core
            .data
            .series
            .values()
            .filter(|line| line.is_enabled())
            .map(|line| line.key().clone())
            .collect()
    }
}
