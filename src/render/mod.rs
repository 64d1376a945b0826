mod null_renderer;
mod primitives;
mod scene;
mod svg_renderer;

pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};
pub use scene::{CanvasNode, NodeId, NodeKind, Scene, SceneNode};
pub use svg_renderer::{SvgRenderer, scene_to_svg};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the retained scene after the chart has applied all
/// pending mutations, so drawing stays isolated from chart logic.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()>;
}
