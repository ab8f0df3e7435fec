use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Bounding, ValueScale};

pub const CANDLE_PANE_ID: &str = "candle";
pub const TIME_AXIS_PANE_ID: &str = "x-axis";

/// Sort key reserved for the time-axis pane.
pub const TIME_AXIS_ORDER: i32 = i32::MAX;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(Cow<'static, str>);

impl PaneId {
    #[must_use]
    pub const fn candle() -> Self {
        Self(Cow::Borrowed(CANDLE_PANE_ID))
    }

    #[must_use]
    pub const fn time_axis() -> Self {
        Self(Cow::Borrowed(TIME_AXIS_PANE_ID))
    }

    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match raw.as_str() {
            CANDLE_PANE_ID => Self::candle(),
            TIME_AXIS_PANE_ID => Self::time_axis(),
            _ => Self(Cow::Owned(raw)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_candle(&self) -> bool {
        self.as_str() == CANDLE_PANE_ID
    }

    #[must_use]
    pub fn is_time_axis(&self) -> bool {
        self.as_str() == TIME_AXIS_PANE_ID
    }

    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.is_candle() || self.is_time_axis()
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PaneId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// What a pane hosts; fixes its capabilities at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaneKind {
    Candle,
    Indicator,
    Script,
    TimeAxis,
}

impl PaneKind {
    /// Content panes carry a value axis; the time-axis pane does not.
    #[must_use]
    pub const fn has_value_axis(self) -> bool {
        !matches!(self, Self::TimeAxis)
    }

    /// Panes whose height is derived from the remaining space or the axis.
    #[must_use]
    pub const fn is_elastic(self) -> bool {
        matches!(self, Self::Candle | Self::TimeAxis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaneState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisPosition {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum AxisSize {
    /// Width follows the tick labels reported by the axis provider.
    #[default]
    Auto,
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisOptions {
    #[serde(default)]
    pub position: AxisPosition,
    /// Labels rendered over the plot area instead of in a gutter.
    #[serde(default)]
    pub inside: bool,
    #[serde(default)]
    pub size: AxisSize,
}

/// Creation options for a new pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PaneOptions {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub min_height: Option<f64>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub axis: AxisOptions,
}

/// Partial update applied through `ChartEngine::set_pane_options`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PaneOptionsUpdate {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub min_height: Option<f64>,
    #[serde(default)]
    pub state: Option<PaneState>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub axis: Option<AxisOptions>,
}

/// Read-only view of a pane's declarative attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneInfo {
    pub id: PaneId,
    pub kind: PaneKind,
    pub order: i32,
    pub height: f64,
    pub min_height: f64,
    pub original_height: f64,
    pub state: PaneState,
    pub visible: bool,
    pub axis: AxisOptions,
}

/// One horizontal strip of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    id: PaneId,
    kind: PaneKind,
    order: i32,
    height: f64,
    min_height: f64,
    original_height: f64,
    pre_maximize_height: f64,
    state: PaneState,
    visible: bool,
    axis: AxisOptions,
    geometry: Bounding,
    value_scale: ValueScale,
}

impl Pane {
    #[must_use]
    pub fn new(id: PaneId, kind: PaneKind, order: i32, height: f64, min_height: f64) -> Self {
        Self {
            id,
            kind,
            order,
            height,
            min_height,
            original_height: height,
            pre_maximize_height: height,
            state: PaneState::Normal,
            visible: true,
            axis: AxisOptions::default(),
            geometry: Bounding::default(),
            value_scale: ValueScale::default(),
        }
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisOptions) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn id(&self) -> &PaneId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> PaneKind {
        self.kind
    }

    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: i32) {
        self.order = if self.kind == PaneKind::TimeAxis {
            TIME_AXIS_ORDER
        } else {
            order.min(TIME_AXIS_ORDER - 1)
        };
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0);
    }

    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    pub(crate) fn set_min_height(&mut self, min_height: f64) {
        self.min_height = min_height.max(0.0);
    }

    #[must_use]
    pub fn original_height(&self) -> f64 {
        self.original_height
    }

    pub(crate) fn set_original_height(&mut self, height: f64) {
        self.original_height = height.max(0.0);
    }

    /// Height held right before the last maximize, whatever the state was.
    pub(crate) fn pre_maximize_height(&self) -> f64 {
        self.pre_maximize_height
    }

    pub(crate) fn set_pre_maximize_height(&mut self, height: f64) {
        self.pre_maximize_height = height.max(0.0);
    }

    #[must_use]
    pub fn state(&self) -> PaneState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: PaneState) {
        self.state = state;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn axis(&self) -> AxisOptions {
        self.axis
    }

    pub(crate) fn set_axis(&mut self, axis: AxisOptions) {
        self.axis = axis;
    }

    /// Vertical placement committed by the last height measurement.
    #[must_use]
    pub fn geometry(&self) -> Bounding {
        self.geometry
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut Bounding {
        &mut self.geometry
    }

    #[must_use]
    pub fn value_scale(&self) -> ValueScale {
        self.value_scale
    }

    pub(crate) fn value_scale_mut(&mut self) -> &mut ValueScale {
        &mut self.value_scale
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.state == PaneState::Normal
    }

    #[must_use]
    pub fn info(&self) -> PaneInfo {
        PaneInfo {
            id: self.id.clone(),
            kind: self.kind,
            order: self.order,
            height: self.height,
            min_height: self.min_height,
            original_height: self.original_height,
            state: self.state,
            visible: self.visible,
            axis: self.axis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pane, PaneId, PaneKind, TIME_AXIS_ORDER};

    #[test]
    fn reserved_ids_are_recognised_from_strings() {
        assert!(PaneId::new("candle").is_candle());
        assert!(PaneId::from("x-axis").is_time_axis());
        assert_eq!(PaneId::new("candle"), PaneId::candle());
        assert!(!PaneId::new("pane_1").is_reserved());
    }

    #[test]
    fn time_axis_order_is_pinned_and_user_orders_stay_below_it() {
        let mut axis = Pane::new(PaneId::time_axis(), PaneKind::TimeAxis, 0, 30.0, 0.0);
        axis.set_order(4);
        assert_eq!(axis.order(), TIME_AXIS_ORDER);

        let mut pane = Pane::new(PaneId::new("pane_1"), PaneKind::Indicator, 1, 100.0, 30.0);
        pane.set_order(i32::MAX);
        assert_eq!(pane.order(), TIME_AXIS_ORDER - 1);
    }

    #[test]
    fn new_pane_remembers_initial_height_as_original() {
        let pane = Pane::new(PaneId::new("pane_1"), PaneKind::Script, 1, 120.0, 60.0);
        assert_eq!(pane.original_height(), 120.0);
        assert!(pane.is_normal());
        assert!(pane.is_visible());
    }
}
