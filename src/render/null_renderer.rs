use crate::error::ChartResult;
use crate::render::{Renderer, Scene};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates the scene so tests catch invalid geometry without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_node_count: usize,
    pub frames_rendered: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.last_node_count = scene.len();
        self.frames_rendered += 1;
        Ok(())
    }
}
