use crate::extensions::{PluginContext, PluginEvent};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let model = &self.core.model;
        PluginContext {
            viewport: model.viewport,
            chart_bounding: model.chart_bounding(),
            layout_generation: model.snapshot.generation,
            pane_count: model.registry.len(),
            visible_range: model.index_scale.visible_range(),
            symbol: model.data.symbol.clone(),
            period: model.data.period.clone(),
            data_len: model.data.data_len,
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.core.runtime.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.core.runtime.plugins {
            plugin.on_event(&event, &context);
        }
    }
}
