use crate::extensions::{AxisProvider, ChartPlugin};
use crate::interaction::SeparatorDragState;

use super::LayoutScheduler;
use super::chart_model::DataState;

/// Runtime orchestration state grouped separately from the model.
pub(super) struct ChartRuntimeState {
    pub(super) scheduler: LayoutScheduler,
    pub(super) axis_provider: Box<dyn AxisProvider>,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) separator_drag: Option<SeparatorDragState>,
    /// Data state seen by the last frame-tick change check.
    pub(super) last_checked_data: DataState,
}
