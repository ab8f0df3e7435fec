use std::sync::Arc;

use tracing::debug;

use crate::core::{HorizontalLayout, IndexScale, LayoutSnapshot, PaneRegistry};
use crate::error::ChartResult;
use crate::extensions::{AxisProvider, FixedAxisProvider};
use crate::render::Renderer;

use super::{
    ChartEngine, ChartEngineConfig, LayoutRequest, LayoutScheduler,
    chart_model::{ChartModel, DataState, LayoutSettings},
    chart_runtime::ChartRuntimeState,
    engine_core::EngineCore,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine holding the candle and time-axis panes.
    ///
    /// A full layout is pending right away; nothing is measured until the
    /// first `flush`.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let index_scale = IndexScale::new(config.bar_space, config.offset_right_distance)?;
        let axis_provider = FixedAxisProvider {
            time_axis_height: config.time_axis_height,
            value_axis_width: config.value_axis_width,
        };

        let mut scheduler = LayoutScheduler::default();
        scheduler.set_countdown_interval(config.countdown_interval_ms);
        scheduler.request(LayoutRequest::full());

        let snapshot = LayoutSnapshot {
            chart: config.viewport.bounding(),
            ..LayoutSnapshot::default()
        };
        let engine = Self {
            renderer,
            core: EngineCore {
                model: ChartModel {
                    viewport: config.viewport,
                    registry: PaneRegistry::new(config.pane_defaults),
                    index_scale,
                    horizontal: HorizontalLayout::default(),
                    gutter_cache: None,
                    snapshot: Arc::new(snapshot),
                    settings: LayoutSettings {
                        separator_size: config.separator_size,
                        separator_fill: config.separator_fill,
                        minimized_pane_height: config.minimized_pane_height,
                    },
                    data: DataState::default(),
                },
                runtime: ChartRuntimeState {
                    scheduler,
                    axis_provider: Box::new(axis_provider),
                    plugins: Vec::new(),
                    separator_drag: None,
                    last_checked_data: DataState::default(),
                },
            },
        };
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "chart engine created"
        );
        Ok(engine)
    }

    /// Replaces the axis collaborator used for auto-sized axes.
    #[must_use]
    pub fn with_axis_provider(mut self, provider: Box<dyn AxisProvider>) -> Self {
        self.set_axis_provider(provider);
        self
    }

    /// Swaps the axis collaborator and schedules a full relayout.
    pub fn set_axis_provider(&mut self, provider: Box<dyn AxisProvider>) {
        self.core.runtime.axis_provider = provider;
        self.request_layout(LayoutRequest::full().with_value_ticks(true));
    }
}
