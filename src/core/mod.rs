pub mod data_set;
pub mod primitives;
pub mod scale_engine;
pub mod series;
pub mod time_axis;
pub mod types;
pub mod view_window;
pub mod viewport_sync;

pub use data_set::{ChartDescriptor, DataSet, SeriesArena};
pub use scale_engine::{ScaleDirection, ScaleEngine, ScaleState, ScaleUpdate};
pub use series::{Series, SeriesKey, SeriesPath, ValueBounds};
pub use time_axis::TimeAxis;
pub use types::{ViewBox, Viewport};
pub use view_window::ViewWindow;
pub use viewport_sync::{AxisPlacement, ViewportSync, ViewportTransforms};
