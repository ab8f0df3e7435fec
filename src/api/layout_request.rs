use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Accumulated layout intents for the next pass.
///
/// Requests raised during one synchronous turn are OR-merged per flag and
/// consumed exactly once by `ChartEngine::flush`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct LayoutRequest {
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub measure_height: bool,
    #[serde(default)]
    pub measure_width: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub build_value_ticks: bool,
    /// Gutters grow to the running maximum instead of following the fresh width.
    #[serde(default)]
    pub cache_value_axis_width: bool,
    #[serde(default)]
    pub force_build_value_ticks: bool,
}

impl LayoutRequest {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            sort: false,
            measure_height: false,
            measure_width: false,
            update: false,
            build_value_ticks: false,
            cache_value_axis_width: false,
            force_build_value_ticks: false,
        }
    }

    /// Every phase, ticks rebuilt only when changed, gutters not cached.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            sort: true,
            measure_height: true,
            measure_width: true,
            update: true,
            build_value_ticks: true,
            cache_value_axis_width: false,
            force_build_value_ticks: false,
        }
    }

    /// Pane set or order changed.
    #[must_use]
    pub const fn reflow() -> Self {
        Self {
            sort: true,
            measure_height: true,
            measure_width: true,
            update: true,
            ..Self::none()
        }
    }

    /// Pane heights changed without touching the order.
    #[must_use]
    pub const fn resize() -> Self {
        Self {
            measure_height: true,
            measure_width: true,
            update: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub const fn repaint() -> Self {
        Self {
            update: true,
            ..Self::none()
        }
    }

    /// Visible data moved: rebuild ticks and repaint, growing gutters only.
    #[must_use]
    pub const fn data_view() -> Self {
        Self {
            update: true,
            build_value_ticks: true,
            cache_value_axis_width: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub const fn with_sort(mut self) -> Self {
        self.sort = true;
        self
    }

    #[must_use]
    pub const fn with_value_ticks(mut self, force: bool) -> Self {
        self.build_value_ticks = true;
        self.force_build_value_ticks |= force;
        self
    }

    #[must_use]
    pub const fn with_cached_value_axis_width(mut self) -> Self {
        self.cache_value_axis_width = true;
        self
    }

    pub fn merge(&mut self, other: Self) {
        self.sort |= other.sort;
        self.measure_height |= other.measure_height;
        self.measure_width |= other.measure_width;
        self.update |= other.update;
        self.build_value_ticks |= other.build_value_ticks;
        self.cache_value_axis_width |= other.cache_value_axis_width;
        self.force_build_value_ticks |= other.force_build_value_ticks;
    }

    #[must_use]
    pub const fn merged(mut self, other: Self) -> Self {
        self.sort |= other.sort;
        self.measure_height |= other.measure_height;
        self.measure_width |= other.measure_width;
        self.update |= other.update;
        self.build_value_ticks |= other.build_value_ticks;
        self.cache_value_axis_width |= other.cache_value_axis_width;
        self.force_build_value_ticks |= other.force_build_value_ticks;
        self
    }

    #[must_use]
    pub const fn builds_value_ticks(self) -> bool {
        self.build_value_ticks || self.force_build_value_ticks
    }

    /// Flags that select a phase. The two modifier flags alone run nothing.
    #[must_use]
    pub const fn is_none(self) -> bool {
        !(self.sort
            || self.measure_height
            || self.measure_width
            || self.update
            || self.builds_value_ticks())
    }
}

/// Phase executed by a layout pass, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayoutPhase {
    Sort,
    MeasureHeight,
    BuildValueTicks,
    MeasureWidth,
    Paint,
}

/// Phases run by one pass.
pub type LayoutTrace = SmallVec<[LayoutPhase; 5]>;
