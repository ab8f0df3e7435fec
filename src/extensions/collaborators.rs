use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::PaneId;

/// Axis components consulted by the layout pass.
///
/// Implementations typically measure tick label text; the engine only needs
/// the resulting sizes and whether a tick rebuild changed anything.
pub trait AxisProvider {
    /// Height of the time-axis strip.
    fn time_axis_height(&mut self) -> f64;

    /// Auto-sized width of the value axis on `pane_id`.
    fn value_axis_width(&mut self, pane_id: &PaneId) -> f64;

    /// Rebuilds value-axis ticks; returns `true` when the tick layout changed.
    fn build_value_ticks(&mut self, pane_id: &PaneId, force: bool) -> bool;

    fn build_time_ticks(&mut self, force: bool) -> bool;
}

/// Axis provider returning configured constant sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedAxisProvider {
    pub time_axis_height: f64,
    pub value_axis_width: f64,
}

impl Default for FixedAxisProvider {
    fn default() -> Self {
        Self {
            time_axis_height: 30.0,
            value_axis_width: 60.0,
        }
    }
}

impl AxisProvider for FixedAxisProvider {
    fn time_axis_height(&mut self) -> f64 {
        self.time_axis_height
    }

    fn value_axis_width(&mut self, _pane_id: &PaneId) -> f64 {
        self.value_axis_width
    }

    fn build_value_ticks(&mut self, _pane_id: &PaneId, _force: bool) -> bool {
        false
    }

    fn build_time_ticks(&mut self, _force: bool) -> bool {
        false
    }
}

/// Membership queries used to decide whether an emptied pane is evicted.
pub trait ContentRegistry {
    fn has_indicators(&self, pane_id: &PaneId) -> bool;
    fn has_scripts(&self, pane_id: &PaneId) -> bool;

    fn is_empty(&self, pane_id: &PaneId) -> bool {
        !self.has_indicators(pane_id) && !self.has_scripts(pane_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Indicator,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentCounts {
    pub indicators: usize,
    pub scripts: usize,
}

/// Counting `ContentRegistry` for hosts without their own indicator store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentTracker {
    counts: IndexMap<PaneId, ContentCounts>,
}

impl ContentTracker {
    pub fn attach(&mut self, pane_id: &PaneId, kind: ContentKind) {
        let counts = self.counts.entry(pane_id.clone()).or_default();
        match kind {
            ContentKind::Indicator => counts.indicators += 1,
            ContentKind::Script => counts.scripts += 1,
        }
    }

    /// Returns `false` when nothing of `kind` was attached to the pane.
    pub fn detach(&mut self, pane_id: &PaneId, kind: ContentKind) -> bool {
        let Some(counts) = self.counts.get_mut(pane_id) else {
            return false;
        };
        let slot = match kind {
            ContentKind::Indicator => &mut counts.indicators,
            ContentKind::Script => &mut counts.scripts,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        if counts.indicators == 0 && counts.scripts == 0 {
            self.counts.shift_remove(pane_id);
        }
        true
    }

    #[must_use]
    pub fn counts(&self, pane_id: &PaneId) -> ContentCounts {
        self.counts.get(pane_id).copied().unwrap_or_default()
    }
}

impl ContentRegistry for ContentTracker {
    fn has_indicators(&self, pane_id: &PaneId) -> bool {
        self.counts(pane_id).indicators > 0
    }

    fn has_scripts(&self, pane_id: &PaneId) -> bool {
        self.counts(pane_id).scripts > 0
    }
}
