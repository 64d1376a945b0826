use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;

use super::ChartConfig;

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a chart instance; doubles as the default title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(String);

impl ChartId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draws `plot-N` from a process-wide monotonic counter starting at 1.
    #[must_use]
    pub fn next() -> Self {
        let n = NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("plot-{n}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Construction options for [`super::Chart`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartOptions {
    pub config: ChartConfig,
    /// Falls back to [`ChartId::next`].
    pub id: Option<ChartId>,
    /// Display title; falls back to the chart id.
    pub title: Option<String>,
    /// Host container size. Without one, rendering is skipped until `resize`.
    pub container: Option<Viewport>,
}

impl ChartOptions {
    #[must_use]
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: ChartId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_container(mut self, container: Viewport) -> Self {
        self.container = Some(container);
        self
    }
}
