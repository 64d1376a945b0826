//! overview-chart: time-series chart engine with a draggable overview window.
//!
//! The preview strip selects a window over the full series; the main view,
//! the Y legend and the date axis follow it. Output is a retained scene graph
//! that any [`render::Renderer`] can draw; [`render::SvgRenderer`] ships in-crate.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartId, ChartOptions};
pub use error::{ChartError, ChartResult};
