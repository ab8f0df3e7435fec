use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: usize,
    pub overlay_frames: usize,
    pub last_generation: Option<u64>,
    pub last_painted_panes: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames += 1;
        self.last_generation = Some(frame.generation());
        self.last_painted_panes = frame.painted_panes().count();
        Ok(())
    }

    fn render_overlays(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.overlay_frames += 1;
        Ok(())
    }
}
