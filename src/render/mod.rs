mod frame;
mod null_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the committed layout snapshot of a pass, so drawing code
/// never reads pane geometry while a layout pass is still writing it.
pub trait Renderer {
    /// Repaints every pane.
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Repaints the overlay layer only. Called at most once per frame tick.
    fn render_overlays(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
