use serde::{Deserialize, Serialize};

use crate::core::{Bounding, Viewport, VisibleRange};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub chart_bounding: Bounding,
    pub layout_generation: u64,
    pub pane_count: usize,
    pub visible_range: VisibleRange,
    pub symbol: Option<String>,
    pub period: Option<String>,
    pub data_len: usize,
}

/// Event stream exposed to plugins.
///
/// The symbol/period/data-length events come from the per-frame state-change
/// check and are the hook scripts and indicators re-evaluate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    SymbolChanged { symbol: Option<String> },
    PeriodChanged { period: Option<String> },
    DataLengthChanged { previous: usize, current: usize },
    LayoutCommitted { generation: u64 },
    OverlayRefreshed { generation: u64 },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating layout
/// state directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: &PluginContext);
}
