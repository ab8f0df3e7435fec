use std::sync::Arc;

use crate::core::{
    Bounding, GutterWidths, HorizontalLayout, IndexScale, LayoutSnapshot, PaneRegistry, Viewport,
};

/// Geometry constants applied by every layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct LayoutSettings {
    pub(super) separator_size: f64,
    pub(super) separator_fill: bool,
    pub(super) minimized_pane_height: f64,
}

/// Host-pushed data state watched by the per-frame change detector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(super) struct DataState {
    pub(super) symbol: Option<String>,
    pub(super) period: Option<String>,
    pub(super) data_len: usize,
}

/// Chart model state grouped for the engine facade.
pub(super) struct ChartModel {
    pub(super) viewport: Viewport,
    pub(super) registry: PaneRegistry,
    pub(super) index_scale: IndexScale,
    pub(super) horizontal: HorizontalLayout,
    pub(super) gutter_cache: Option<GutterWidths>,
    pub(super) snapshot: Arc<LayoutSnapshot>,
    pub(super) settings: LayoutSettings,
    pub(super) data: DataState,
}

impl ChartModel {
    #[must_use]
    pub(super) fn chart_bounding(&self) -> Bounding {
        self.viewport.bounding()
    }
}
