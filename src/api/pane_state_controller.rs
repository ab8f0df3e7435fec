use tracing::debug;

use crate::core::{PaneId, PaneState, transition_pane_state};
use crate::interaction::SeparatorDragState;
use crate::render::Renderer;

use super::{ChartEngine, LayoutRequest};

impl<R: Renderer> ChartEngine<R> {
    /// Moves a pane to `state`; see `transition_pane_state` for the height
    /// bookkeeping. Returns whether the state changed.
    pub fn set_pane_state(&mut self, pane_id: &PaneId, state: PaneState) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let content_height = self.content_height();
        let minimized_height = self.core.model.settings.minimized_pane_height;
        if !transition_pane_state(
            &mut self.core.model.registry,
            pane_id,
            state,
            content_height,
            minimized_height,
        ) {
            return false;
        }
        let dragging_pane = self
            .core
            .runtime
            .separator_drag
            .as_ref()
            .is_some_and(|drag| &drag.pane_id == pane_id || &drag.top_pane_id == pane_id);
        if dragging_pane {
            self.core.runtime.separator_drag = None;
        }
        self.request_layout(LayoutRequest::resize());
        true
    }

    pub fn maximize_pane(&mut self, pane_id: &PaneId) -> bool {
        self.set_pane_state(pane_id, PaneState::Maximized)
    }

    pub fn minimize_pane(&mut self, pane_id: &PaneId) -> bool {
        self.set_pane_state(pane_id, PaneState::Minimized)
    }

    pub fn restore_pane(&mut self, pane_id: &PaneId) -> bool {
        self.set_pane_state(pane_id, PaneState::Normal)
    }

    /// Starts dragging the separator above `pane_id`.
    ///
    /// Both panes next to the separator must be normal and visible.
    pub fn begin_separator_drag(&mut self, pane_id: &PaneId) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let registry = &self.core.model.registry;
        let Some(separator) = registry
            .separator(pane_id)
            .filter(|separator| separator.is_visible())
        else {
            return false;
        };
        let top_pane_id = separator.top_pane_id().clone();
        let (Some(top), Some(bottom)) = (registry.pane(&top_pane_id), registry.pane(pane_id))
        else {
            return false;
        };
        let draggable = [top, bottom]
            .iter()
            .all(|pane| pane.is_normal() && pane.is_visible());
        if !draggable {
            debug!(pane_id = %pane_id, "separator drag rejected: neighbour not normal");
            return false;
        }
        self.core.runtime.separator_drag = Some(SeparatorDragState {
            pane_id: pane_id.clone(),
            top_pane_id,
            start_top_height: top.height(),
            start_bottom_height: bottom.height(),
        });
        true
    }

    /// Moves the active separator `distance_px` down from where the drag
    /// started; negative distances move it up.
    pub fn drag_separator(&mut self, distance_px: f64) -> bool {
        let Some(drag) = self.core.runtime.separator_drag.clone() else {
            return false;
        };
        let registry = &mut self.core.model.registry;
        let mins = registry
            .pane(&drag.top_pane_id)
            .zip(registry.pane(&drag.pane_id))
            .map(|(top, bottom)| (top.min_height(), bottom.min_height()));
        let Some((top_min, bottom_min)) = mins else {
            self.core.runtime.separator_drag = None;
            return false;
        };
        let Some((top_height, bottom_height)) = drag.resolve(distance_px, top_min, bottom_min)
        else {
            return false;
        };
        let unchanged = registry
            .pane(&drag.top_pane_id)
            .is_some_and(|top| top.height() == top_height);
        if unchanged {
            return false;
        }
        if let Some(top) = registry.pane_mut(&drag.top_pane_id) {
            top.set_height(top_height);
        }
        if let Some(bottom) = registry.pane_mut(&drag.pane_id) {
            bottom.set_height(bottom_height);
        }
        self.request_layout(LayoutRequest::resize().with_value_ticks(false))
    }

    pub fn end_separator_drag(&mut self) -> bool {
        self.core.runtime.separator_drag.take().is_some()
    }

    #[must_use]
    pub fn separator_drag(&self) -> Option<&SeparatorDragState> {
        self.core.runtime.separator_drag.as_ref()
    }
}
