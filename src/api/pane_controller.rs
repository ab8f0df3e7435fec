use tracing::{debug, warn};

use crate::core::{
    AxisOptions, AxisSize, PaneId, PaneInfo, PaneKind, PaneOptions, PaneOptionsUpdate, PaneState,
    redistribute_height, restore_sole_content_pane,
};
use crate::extensions::ContentRegistry;
use crate::render::Renderer;

use super::{ChartEngine, LayoutRequest};

impl<R: Renderer> ChartEngine<R> {
    /// Panes in their current order.
    #[must_use]
    pub fn panes(&self) -> Vec<PaneInfo> {
        self.core.model.registry.panes().map(|pane| pane.info()).collect()
    }

    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.core.model.registry.pane_ids()
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.core.model.registry.len()
    }

    #[must_use]
    pub fn has_pane(&self, pane_id: &PaneId) -> bool {
        self.core.model.registry.contains(pane_id)
    }

    #[must_use]
    pub fn pane_options(&self, pane_id: &PaneId) -> Option<PaneInfo> {
        self.core.model.registry.pane(pane_id).map(|pane| pane.info())
    }

    /// Creates an indicator or script pane and schedules a reflow.
    ///
    /// `id` is generated when absent. Returns `None` for reserved or taken
    /// ids, elastic kinds and invalid heights.
    pub fn add_pane(
        &mut self,
        kind: PaneKind,
        id: Option<PaneId>,
        options: PaneOptions,
    ) -> Option<PaneId> {
        if self.is_destroyed() {
            return None;
        }
        if !valid_min_height(options.min_height) || !valid_height(options.height) {
            warn!(
                kind = ?kind,
                height = ?options.height,
                min_height = ?options.min_height,
                "rejecting pane with invalid heights"
            );
            return None;
        }
        if !valid_axis(options.axis) {
            warn!(kind = ?kind, "rejecting pane with invalid axis size");
            return None;
        }

        let Some(pane_id) = self.core.model.registry.add_pane(kind, id, options) else {
            debug!(kind = ?kind, "pane not added: id taken or kind reserved");
            return None;
        };
        let registry = &mut self.core.model.registry;
        let maximized = registry
            .panes()
            .any(|pane| pane.state() == PaneState::Maximized);
        if maximized {
            if let Some(pane) = registry.pane_mut(&pane_id) {
                pane.set_visible(false);
            }
        }
        self.fit_added_pane_height(&pane_id);
        debug!(pane_id = %pane_id, kind = ?kind, "pane added");
        self.request_layout(LayoutRequest::reflow());
        Some(pane_id)
    }

    /// Returns `pane_id`, creating the pane first when it does not exist.
    pub fn ensure_pane(
        &mut self,
        kind: PaneKind,
        pane_id: PaneId,
        options: PaneOptions,
    ) -> Option<PaneId> {
        if self.core.model.registry.contains(&pane_id) {
            return Some(pane_id);
        }
        self.add_pane(kind, Some(pane_id), options)
    }

    /// Removes a content pane; the candle pane takes over its height.
    ///
    /// Reserved panes cannot be removed.
    pub fn remove_pane(&mut self, pane_id: &PaneId) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if pane_id.is_reserved() {
            debug!(pane_id = %pane_id, "reserved pane cannot be removed");
            return false;
        }
        let Some(removed) = self.core.model.registry.remove_pane(pane_id) else {
            return false;
        };

        if removed.state() == PaneState::Maximized {
            for pane in self.core.model.registry.panes_mut() {
                if pane.kind() != PaneKind::TimeAxis {
                    pane.set_visible(true);
                }
            }
        }
        let drag_touches_pane = self
            .core
            .runtime
            .separator_drag
            .as_ref()
            .is_some_and(|drag| &drag.pane_id == pane_id || &drag.top_pane_id == pane_id);
        if drag_touches_pane {
            self.core.runtime.separator_drag = None;
        }

        let content_height = self.content_height();
        if restore_sole_content_pane(&mut self.core.model.registry, content_height) {
            debug!(content_height, "candle pane restored as sole content pane");
        }
        debug!(pane_id = %pane_id, "pane removed");
        self.request_layout(LayoutRequest::reflow());
        true
    }

    /// Evicts `pane_id` once it hosts no indicator or script anymore.
    pub fn release_pane_if_empty(&mut self, pane_id: &PaneId, content: &dyn ContentRegistry) -> bool {
        if pane_id.is_reserved() || !self.core.model.registry.contains(pane_id) {
            return false;
        }
        if !content.is_empty(pane_id) {
            return false;
        }
        self.remove_pane(pane_id)
    }

    /// Applies a partial option update.
    ///
    /// Invalid values reject the whole update. Height changes apply to normal
    /// panes only and are absorbed by the other normal panes. Returns whether
    /// anything changed.
    pub fn set_pane_options(&mut self, pane_id: &PaneId, update: PaneOptionsUpdate) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let Some(kind) = self.core.model.registry.pane(pane_id).map(|pane| pane.kind()) else {
            debug!(pane_id = %pane_id, "options update for unknown pane");
            return false;
        };
        if !valid_min_height(update.min_height) {
            warn!(pane_id = %pane_id, min_height = ?update.min_height, "rejecting invalid pane min height");
            return false;
        }
        if !valid_height(update.height) {
            warn!(pane_id = %pane_id, height = ?update.height, "rejecting invalid pane height");
            return false;
        }
        if update.axis.is_some_and(|axis| !valid_axis(axis)) {
            warn!(pane_id = %pane_id, "rejecting invalid axis size");
            return false;
        }
        if kind == PaneKind::TimeAxis {
            debug!("time-axis pane options are fixed");
            return false;
        }

        let mut request = LayoutRequest::none();
        let mut changed = false;
        let registry = &mut self.core.model.registry;

        if let Some(order) = update.order {
            if let Some(pane) = registry.pane_mut(pane_id).filter(|pane| pane.order() != order) {
                pane.set_order(order);
                request.merge(LayoutRequest::reflow());
                changed = true;
            }
        }
        if let Some(axis) = update.axis {
            if let Some(pane) = registry.pane_mut(pane_id).filter(|pane| pane.axis() != axis) {
                pane.set_axis(axis);
                request.merge(LayoutRequest::repaint().with_value_ticks(true));
                request.measure_width = true;
                changed = true;
            }
        }
        if let Some(min_height) = update.min_height {
            if let Some(pane) = registry
                .pane_mut(pane_id)
                .filter(|pane| pane.min_height() != min_height)
            {
                pane.set_min_height(min_height);
                let raise = pane.is_normal() && pane.height() < min_height;
                if raise {
                    redistribute_height(registry, pane_id, min_height);
                }
                request.merge(LayoutRequest::resize());
                changed = true;
            }
        }
        if let Some(height) = update.height {
            let floor = registry
                .pane(pane_id)
                .filter(|pane| pane.is_normal())
                .map(|pane| pane.min_height());
            if let Some(floor) = floor {
                if redistribute_height(registry, pane_id, height.max(floor)) {
                    request.merge(LayoutRequest::resize());
                    changed = true;
                }
            } else {
                debug!(pane_id = %pane_id, "height change ignored for non-normal pane");
            }
        }
        if let Some(state) = update.state {
            changed |= self.set_pane_state(pane_id, state);
        }

        self.request_layout(request);
        changed
    }

    /// Keeps the candle pane's minimum free when a new pane is declared
    /// taller than the space left in the normal layout.
    fn fit_added_pane_height(&mut self, pane_id: &PaneId) {
        let content_height = self.content_height();
        let separator_size = self.core.model.settings.separator_size;
        let registry = &mut self.core.model.registry;
        let Some(candle_min) = registry.candle().map(|candle| candle.min_height()) else {
            return;
        };
        let mut occupied = 0.0;
        let mut content_panes = 0_usize;
        for pane in registry.panes() {
            if pane.kind() == PaneKind::TimeAxis {
                continue;
            }
            content_panes += 1;
            if pane.kind() == PaneKind::Candle || pane.id() == pane_id {
                continue;
            }
            occupied += if pane.state() == PaneState::Maximized {
                pane.original_height()
            } else {
                pane.height()
            };
        }
        let separators = content_panes.saturating_sub(1) as f64 * separator_size;
        let available = (content_height - occupied - separators - candle_min).max(0.0);
        if let Some(pane) = registry
            .pane_mut(pane_id)
            .filter(|pane| pane.height() > available)
        {
            let fitted = available.max(pane.min_height());
            debug!(pane_id = %pane_id, declared = pane.height(), fitted, "new pane height fitted");
            pane.set_height(fitted);
            pane.set_original_height(fitted);
        }
    }
}

fn valid_height(height: Option<f64>) -> bool {
    height.is_none_or(|height| height.is_finite() && height > 0.0)
}

fn valid_min_height(min_height: Option<f64>) -> bool {
    min_height.is_none_or(|min_height| min_height.is_finite() && min_height >= 0.0)
}

fn valid_axis(axis: AxisOptions) -> bool {
    match axis.size {
        AxisSize::Auto => true,
        AxisSize::Fixed(width) => width.is_finite() && width >= 0.0,
    }
}
