use crate::core::Viewport;
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::{FrameStats, LayoutPhase, LayoutRequest, SchedulerState, engine_core::EngineCore};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the pane registry, the shared index axis, the layout
/// scheduler and the renderer. Mutating calls only record intent; geometry
/// changes become visible after `flush`.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn frame_stats(&self) -> FrameStats {
        self.core.runtime.scheduler.stats()
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.core.runtime.scheduler.state()
    }

    #[must_use]
    pub fn pending_layout(&self) -> LayoutRequest {
        self.core.runtime.scheduler.pending()
    }

    #[must_use]
    pub fn has_pending_layout(&self) -> bool {
        self.core.runtime.scheduler.state() == SchedulerState::Pending
    }

    /// Phases run by the most recent pass.
    #[must_use]
    pub fn last_layout_trace(&self) -> &[LayoutPhase] {
        self.core.runtime.scheduler.last_trace()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        if self.core.runtime.separator_drag.is_some() {
            InteractionMode::SeparatorDrag
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.core.runtime.scheduler.is_destroyed()
    }
}
