use serde::{Deserialize, Serialize};

use crate::core::PaneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    SeparatorDrag,
}

/// Heights captured when a separator drag starts.
///
/// Drag distances are applied against these start heights rather than the
/// current ones so repeated move events do not accumulate rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparatorDragState {
    /// Pane below the separator; the separator is keyed by it.
    pub pane_id: PaneId,
    pub top_pane_id: PaneId,
    pub start_top_height: f64,
    pub start_bottom_height: f64,
}

impl SeparatorDragState {
    /// Heights of the top and bottom panes after moving the separator by
    /// `distance_px`, each kept at or above its minimum.
    ///
    /// Returns `None` when the two panes cannot both hold their minimum.
    #[must_use]
    pub fn resolve(&self, distance_px: f64, top_min: f64, bottom_min: f64) -> Option<(f64, f64)> {
        let total = self.start_top_height + self.start_bottom_height;
        if !distance_px.is_finite() || total < top_min + bottom_min {
            return None;
        }
        let top = (self.start_top_height + distance_px).clamp(top_min, total - bottom_min);
        Some((top, total - top))
    }
}
