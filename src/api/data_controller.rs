use tracing::{debug, trace, warn};

use crate::core::{IndexScale, PaneId, ValueScale, VisibleRange};
use crate::render::Renderer;

use super::{ChartEngine, LayoutRequest};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.core.model.data.symbol.as_deref()
    }

    #[must_use]
    pub fn period(&self) -> Option<&str> {
        self.core.model.data.period.as_deref()
    }

    #[must_use]
    pub fn data_length(&self) -> usize {
        self.core.model.data.data_len
    }

    #[must_use]
    pub fn index_scale(&self) -> IndexScale {
        self.core.model.index_scale
    }

    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        self.core.model.index_scale.visible_range()
    }

    #[must_use]
    pub fn value_scale(&self, pane_id: &PaneId) -> Option<ValueScale> {
        self.core
            .model
            .registry
            .pane(pane_id)
            .filter(|pane| pane.kind().has_value_axis())
            .map(|pane| pane.value_scale())
    }

    /// Records the active symbol. The change is reported to plugins on the
    /// frame tick after the next pass.
    pub fn set_symbol(&mut self, symbol: Option<String>) -> bool {
        if self.is_destroyed() || self.core.model.data.symbol == symbol {
            return false;
        }
        debug!(symbol = ?symbol, "set symbol");
        self.core.model.data.symbol = symbol;
        self.request_layout(LayoutRequest::data_view().with_value_ticks(true))
    }

    pub fn set_period(&mut self, period: Option<String>) -> bool {
        if self.is_destroyed() || self.core.model.data.period == period {
            return false;
        }
        debug!(period = ?period, "set period");
        self.core.model.data.period = period;
        self.request_layout(LayoutRequest::data_view().with_value_ticks(true))
    }

    /// Updates the number of bars the index axis spans.
    pub fn set_data_length(&mut self, data_len: usize) -> bool {
        if self.is_destroyed() || self.core.model.data.data_len == data_len {
            return false;
        }
        trace!(previous = self.core.model.data.data_len, data_len, "set data length");
        self.core.model.data.data_len = data_len;
        self.core.model.index_scale.set_data_len(data_len);
        self.request_layout(LayoutRequest::data_view())
    }

    pub fn set_bar_space(&mut self, bar_space: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if let Err(err) = self.core.model.index_scale.set_bar_space(bar_space) {
            warn!(error = %err, bar_space, "rejecting bar space");
            return false;
        }
        self.request_layout(LayoutRequest::data_view())
    }

    /// Distance between the last bar and the right edge of the main area.
    pub fn set_offset_right_distance(&mut self, distance_px: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if let Err(err) = self
            .core
            .model
            .index_scale
            .set_offset_right_distance(distance_px)
        {
            warn!(error = %err, distance_px, "rejecting offset right distance");
            return false;
        }
        self.request_layout(LayoutRequest::data_view())
    }

    pub fn scroll_by_pixels(&mut self, distance_px: f64) -> bool {
        if self.is_destroyed() || distance_px == 0.0 {
            return false;
        }
        if let Err(err) = self.core.model.index_scale.scroll_by_pixels(distance_px) {
            warn!(error = %err, "ignoring scroll");
            return false;
        }
        self.request_layout(LayoutRequest::data_view())
    }

    pub fn zoom_at(&mut self, factor: f64, anchor_x: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if let Err(err) = self.core.model.index_scale.zoom_at(factor, anchor_x) {
            warn!(error = %err, "ignoring zoom");
            return false;
        }
        self.request_layout(LayoutRequest::data_view())
    }

    /// Sets the visible value range of a pane's axis.
    pub fn set_value_range(&mut self, pane_id: &PaneId, from: f64, to: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let Some(pane) = self
            .core
            .model
            .registry
            .pane_mut(pane_id)
            .filter(|pane| pane.kind().has_value_axis())
        else {
            return false;
        };
        if let Err(err) = pane.value_scale_mut().set_range(from, to) {
            warn!(error = %err, pane_id = %pane_id, "rejecting value range");
            return false;
        }
        self.request_layout(LayoutRequest::data_view())
    }

    /// Fits a pane's value range to `values` with a relative padding.
    pub fn fit_value_range(&mut self, pane_id: &PaneId, values: &[f64], padding_ratio: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let Some(pane) = self
            .core
            .model
            .registry
            .pane_mut(pane_id)
            .filter(|pane| pane.kind().has_value_axis())
        else {
            return false;
        };
        if let Err(err) = pane.value_scale_mut().fit_to_values(values, padding_ratio) {
            warn!(error = %err, pane_id = %pane_id, "skipping value range fit");
            return false;
        }
        self.request_layout(LayoutRequest::data_view())
    }

    pub fn set_value_axis_inverted(&mut self, pane_id: &PaneId, inverted: bool) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let Some(pane) = self
            .core
            .model
            .registry
            .pane_mut(pane_id)
            .filter(|pane| pane.kind().has_value_axis() && pane.value_scale().is_inverted() != inverted)
        else {
            return false;
        };
        pane.value_scale_mut().set_inverted(inverted);
        self.request_layout(LayoutRequest::repaint())
    }

    /// Forgets the cached gutter widths so they may shrink again.
    pub fn clear_value_axis_width_cache(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.core.model.gutter_cache = None;
        self.request_layout(LayoutRequest {
            measure_width: true,
            update: true,
            ..LayoutRequest::none()
        })
    }

    pub fn set_countdown_interval_ms(&mut self, interval_ms: Option<u64>) {
        self.core.runtime.scheduler.set_countdown_interval(interval_ms);
    }
}
