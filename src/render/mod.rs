pub mod frame;
pub mod null_renderer;
pub mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, DrawCommand};

use crate::error::ChartResult;

/// Backend seam: consumes flattened frames produced from the scene graph.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
