use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{
    AxisMeasure, AxisSize, LayoutSnapshot, PaneRegistry, PaneState, Viewport,
    apply_horizontal_layout, measure_heights, measure_widths,
};
use crate::extensions::PluginEvent;
use crate::render::{RenderFrame, Renderer};

use super::{ChartEngine, FrameEffects, LayoutPhase, LayoutRequest, LayoutTrace};

impl<R: Renderer> ChartEngine<R> {
    /// Merges `request` into the pending pass.
    ///
    /// Nothing is measured here; the pass runs on the next `flush`. Returns
    /// `false` when the request selects no phase or the engine is destroyed.
    pub fn request_layout(&mut self, request: LayoutRequest) -> bool {
        self.core.runtime.scheduler.request(request)
    }

    /// Schedules one overlay repaint for the next frame tick.
    pub fn request_overlay_refresh(&mut self) -> bool {
        self.core.runtime.scheduler.request_overlay_refresh()
    }

    /// Runs the pending layout pass, if any.
    ///
    /// Hosts call this once the current batch of mutations is done. Returns
    /// whether a pass ran.
    pub fn flush(&mut self) -> bool {
        let Some(request) = self.core.runtime.scheduler.begin_pass() else {
            return false;
        };
        let trace = self.run_layout_pass(request);
        debug!(
            phases = ?trace.as_slice(),
            generation = self.core.model.snapshot.generation,
            "layout pass finished"
        );
        self.core.runtime.scheduler.finish_pass(trace);
        true
    }

    /// Runs the post-layout effects due on this paint tick.
    pub fn on_animation_frame(&mut self, now_ms: u64) -> FrameEffects {
        let effects = self.core.runtime.scheduler.take_frame_effects(now_ms);
        if effects.state_check {
            self.detect_data_state_changes();
        }
        if effects.overlay_refresh {
            self.refresh_overlays();
        }
        if effects.countdown {
            trace!(now_ms, "countdown redraw");
            self.request_layout(LayoutRequest::repaint());
        }
        effects
    }

    /// Recomputes the container bounding and schedules a full layout.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            warn!(width, height, "ignoring resize to an empty viewport");
            return false;
        }
        if viewport == self.core.model.viewport {
            return false;
        }
        self.core.model.viewport = viewport;
        debug!(width, height, "chart resized");
        self.request_layout(LayoutRequest::full())
    }

    /// Cancels every scheduled pass, frame effect and timer, then drops all
    /// panes and plugins. Later calls are no-ops.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.core.runtime.scheduler.destroy();
        self.core.runtime.plugins.clear();
        self.core.runtime.separator_drag = None;
        let defaults = self.core.model.registry.defaults();
        self.core.model.registry = PaneRegistry::new(defaults);
        self.core.model.gutter_cache = None;
        self.core.model.snapshot = Arc::new(LayoutSnapshot::default());
        debug!("chart engine destroyed");
    }

    /// Container height minus the time-axis strip.
    pub(super) fn content_height(&mut self) -> f64 {
        let time_axis_height = self.core.runtime.axis_provider.time_axis_height().max(0.0);
        (f64::from(self.core.model.viewport.height) - time_axis_height).max(0.0)
    }

    pub(super) fn render_frame(&self) -> RenderFrame {
        RenderFrame::new(
            Arc::clone(&self.core.model.snapshot),
            self.core.model.index_scale.visible_range(),
        )
    }

    fn run_layout_pass(&mut self, request: LayoutRequest) -> LayoutTrace {
        let mut trace = LayoutTrace::new();

        if request.sort {
            self.core.model.registry.sort();
            trace.push(LayoutPhase::Sort);
        }
        if request.measure_height {
            self.measure_height_phase();
            trace.push(LayoutPhase::MeasureHeight);
        }
        let mut measure_width = request.measure_width;
        if request.builds_value_ticks() {
            if self.build_value_ticks_phase(request.force_build_value_ticks) {
                measure_width = true;
            }
            trace.push(LayoutPhase::BuildValueTicks);
        }
        if measure_width {
            self.measure_width_phase(request.cache_value_axis_width);
            trace.push(LayoutPhase::MeasureWidth);
        }

        self.commit_snapshot();

        if request.update {
            self.paint_phase();
            trace.push(LayoutPhase::Paint);
        }
        trace
    }

    fn measure_height_phase(&mut self) {
        let time_axis_height = self.core.runtime.axis_provider.time_axis_height();
        let content_height = self.content_height();
        let model = &mut self.core.model;
        // A maximized pane tracks the container and the time-axis strip.
        for pane in model.registry.panes_mut() {
            if pane.state() == PaneState::Maximized {
                pane.set_height(content_height);
            }
        }
        measure_heights(
            &mut model.registry,
            f64::from(model.viewport.height),
            time_axis_height,
            model.settings.separator_size,
        );
    }

    /// Returns whether any pane's tick layout changed.
    fn build_value_ticks_phase(&mut self, force: bool) -> bool {
        let provider = &mut self.core.runtime.axis_provider;
        let mut changed = false;
        for pane in self.core.model.registry.panes() {
            if pane.kind().has_value_axis() {
                changed |= provider.build_value_ticks(pane.id(), force);
            }
        }
        trace!(force, changed, "value ticks rebuilt");
        changed
    }

    fn measure_width_phase(&mut self, use_cache: bool) {
        let provider = &mut self.core.runtime.axis_provider;
        let model = &mut self.core.model;
        let measures: SmallVec<[AxisMeasure; 8]> = model
            .registry
            .panes()
            .filter(|pane| pane.kind().has_value_axis())
            .map(|pane| {
                let axis = pane.axis();
                let width = match axis.size {
                    AxisSize::Auto => provider.value_axis_width(pane.id()),
                    AxisSize::Fixed(width) => width,
                };
                AxisMeasure {
                    position: axis.position,
                    inside: axis.inside,
                    width,
                }
            })
            .collect();

        let cache = if use_cache { model.gutter_cache } else { None };
        let horizontal = measure_widths(&measures, f64::from(model.viewport.width), cache);
        model.gutter_cache = Some(horizontal.gutters);
        model.horizontal = horizontal;
        apply_horizontal_layout(
            &mut model.registry,
            horizontal,
            model.settings.separator_fill,
        );
        model.index_scale.set_width_px(horizontal.main_width);
        trace!(
            left = horizontal.gutters.left,
            right = horizontal.gutters.right,
            main_width = horizontal.main_width,
            cached = use_cache,
            "value axis widths measured"
        );
    }

    fn commit_snapshot(&mut self) {
        let model = &mut self.core.model;
        let generation = model.snapshot.generation + 1;
        model.snapshot = Arc::new(LayoutSnapshot::capture(
            &model.registry,
            model.chart_bounding(),
            model.horizontal,
            generation,
        ));
        self.emit_plugin_event(PluginEvent::LayoutCommitted { generation });
    }

    fn paint_phase(&mut self) {
        self.core.runtime.axis_provider.build_time_ticks(true);
        let frame = self.render_frame();
        if let Err(err) = self.renderer.render(&frame) {
            warn!(
                error = %err,
                generation = frame.generation(),
                "render failed; layout state kept"
            );
            self.core.runtime.scheduler.record_render_failure();
        }
    }

    fn refresh_overlays(&mut self) {
        let frame = self.render_frame();
        match self.renderer.render_overlays(&frame) {
            Ok(()) => {
                self.core.runtime.scheduler.record_overlay_refresh();
                self.emit_plugin_event(PluginEvent::OverlayRefreshed {
                    generation: frame.generation(),
                });
            }
            Err(err) => {
                warn!(
                    error = %err,
                    generation = frame.generation(),
                    "overlay refresh failed"
                );
                self.core.runtime.scheduler.record_render_failure();
            }
        }
    }

    fn detect_data_state_changes(&mut self) {
        let current = self.core.model.data.clone();
        let previous = std::mem::replace(&mut self.core.runtime.last_checked_data, current.clone());
        if previous.symbol != current.symbol {
            debug!(symbol = ?current.symbol, "symbol changed");
            self.emit_plugin_event(PluginEvent::SymbolChanged {
                symbol: current.symbol.clone(),
            });
        }
        if previous.period != current.period {
            debug!(period = ?current.period, "period changed");
            self.emit_plugin_event(PluginEvent::PeriodChanged {
                period: current.period.clone(),
            });
        }
        if previous.data_len != current.data_len {
            self.emit_plugin_event(PluginEvent::DataLengthChanged {
                previous: previous.data_len,
                current: current.data_len,
            });
        }
    }
}
