use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{
    AxisPosition, Bounding, BoundingUpdate, Pane, PaneId, PaneKind, PaneRegistry, PaneState,
};
use crate::error::{ChartError, ChartResult};

pub const LAYOUT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Width contribution of one content pane's value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMeasure {
    pub position: AxisPosition,
    pub inside: bool,
    pub width: f64,
}

/// Left/right gutter widths, also used as the monotonic width cache.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GutterWidths {
    pub left: f64,
    pub right: f64,
}

impl GutterWidths {
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            right: self.right.max(other.right),
        }
    }
}

/// Horizontal geometry shared by every pane after a width measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HorizontalLayout {
    pub total_width: f64,
    pub main_left: f64,
    pub main_width: f64,
    pub main_right: f64,
    pub gutters: GutterWidths,
    pub left_outside: bool,
    pub right_outside: bool,
}

impl HorizontalLayout {
    #[must_use]
    pub fn root(self) -> Bounding {
        Bounding {
            left: 0.0,
            width: self.total_width,
            right: 0.0,
            ..Bounding::default()
        }
    }

    #[must_use]
    pub fn main(self) -> Bounding {
        Bounding {
            left: self.main_left,
            width: self.main_width,
            right: self.main_right,
            ..Bounding::default()
        }
    }

    #[must_use]
    pub fn axis(self, position: AxisPosition) -> Bounding {
        match position {
            AxisPosition::Left => Bounding {
                left: 0.0,
                width: self.gutters.left,
                right: (self.total_width - self.gutters.left).max(0.0),
                ..Bounding::default()
            },
            AxisPosition::Right => Bounding {
                left: (self.total_width - self.gutters.right).max(0.0),
                width: self.gutters.right,
                right: 0.0,
                ..Bounding::default()
            },
        }
    }
}

/// Vertical pass: assigns heights and tops to every pane and separator.
///
/// Non-candle content panes keep their declared height clipped to what is
/// left once the floors of the panes after them are reserved; the candle
/// pane takes the remainder. A pane's floor is its min height, or its
/// current height while minimized. Hidden panes collapse to zero laid-out
/// height but keep their declared height for later restoration.
pub fn measure_heights(
    registry: &mut PaneRegistry,
    container_height: f64,
    time_axis_height: f64,
    separator_size: f64,
) {
    let time_axis_height = time_axis_height.max(0.0);
    let separator_size = separator_size.max(0.0);
    let mut remaining = (container_height - time_axis_height).max(0.0);

    let mut seen_visible = false;
    for index in 0..registry.len() {
        let Some((pane, separator)) = registry.pane_and_separator_mut(index) else {
            continue;
        };
        if pane.kind() == PaneKind::TimeAxis {
            continue;
        }
        if let Some(separator) = separator {
            let visible = pane.is_visible() && seen_visible;
            separator.set_visible(visible);
            if visible {
                remaining = (remaining - separator_size).max(0.0);
            }
        }
        seen_visible |= pane.is_visible();
    }

    let mut reserved: f64 = registry.panes().map(height_floor).sum();

    for pane in registry.panes_mut() {
        let laid_out = match pane.kind() {
            PaneKind::TimeAxis => {
                pane.set_height(time_axis_height);
                time_axis_height
            }
            PaneKind::Candle => continue,
            PaneKind::Indicator | PaneKind::Script if pane.is_visible() => {
                let floor = height_floor(pane);
                reserved -= floor;
                let available = (remaining - reserved).max(0.0);
                let height = pane.height().max(floor).min(available);
                remaining -= height;
                pane.set_height(height);
                height
            }
            PaneKind::Indicator | PaneKind::Script => 0.0,
        };
        pane.geometry_mut().apply(BoundingUpdate::height(laid_out));
    }

    if let Some(candle) = registry.pane_mut(&PaneId::candle()) {
        let laid_out = if candle.is_visible() {
            candle.set_height(remaining);
            remaining
        } else {
            0.0
        };
        candle.geometry_mut().apply(BoundingUpdate::height(laid_out));
    }

    let mut top = 0.0;
    for index in 0..registry.len() {
        let Some((pane, separator)) = registry.pane_and_separator_mut(index) else {
            continue;
        };
        if let Some(separator) = separator {
            let height = if separator.is_visible() {
                separator_size
            } else {
                0.0
            };
            separator.geometry_mut().apply(BoundingUpdate {
                top: Some(top),
                height: Some(height),
                ..BoundingUpdate::default()
            });
            top += height;
        }
        pane.geometry_mut().apply(BoundingUpdate::top(top));
        top += pane.geometry().height;
        let laid_out = pane.geometry().height;
        pane.value_scale_mut().set_height_px(laid_out);
    }
}

fn height_floor(pane: &Pane) -> f64 {
    if !pane.is_visible() {
        return 0.0;
    }
    match pane.kind() {
        PaneKind::TimeAxis => 0.0,
        PaneKind::Candle => pane.min_height(),
        PaneKind::Indicator | PaneKind::Script if pane.state() == PaneState::Minimized => {
            pane.height()
        }
        PaneKind::Indicator | PaneKind::Script => pane.min_height(),
    }
}

/// Horizontal pass: resolves gutter widths and the main plot area.
///
/// With `cache` present the gutters never shrink below the cached widths.
#[must_use]
pub fn measure_widths(
    measures: &[AxisMeasure],
    total_width: f64,
    cache: Option<GutterWidths>,
) -> HorizontalLayout {
    let total_width = total_width.max(0.0);
    let side_width = |position: AxisPosition| {
        measures
            .iter()
            .filter(|measure| measure.position == position)
            .map(|measure| OrderedFloat(measure.width.max(0.0)))
            .max()
            .map_or(0.0, |width| width.0)
    };
    let side_outside = |position: AxisPosition| {
        !measures
            .iter()
            .any(|measure| measure.position == position && measure.inside)
    };

    let mut gutters = GutterWidths {
        left: side_width(AxisPosition::Left),
        right: side_width(AxisPosition::Right),
    };
    if let Some(cached) = cache {
        gutters = gutters.max(cached);
    }
    let left_outside = side_outside(AxisPosition::Left);
    let right_outside = side_outside(AxisPosition::Right);

    let mut main_width = total_width;
    let mut main_left = 0.0;
    let mut main_right = 0.0;
    if left_outside {
        main_width -= gutters.left;
        main_left = gutters.left;
    }
    if right_outside {
        main_width -= gutters.right;
        main_right = gutters.right;
    }

    HorizontalLayout {
        total_width,
        main_left,
        main_width: main_width.max(0.0),
        main_right,
        gutters,
        left_outside,
        right_outside,
    }
}

/// Writes the shared horizontal geometry onto every pane and separator.
pub fn apply_horizontal_layout(
    registry: &mut PaneRegistry,
    horizontal: HorizontalLayout,
    separator_fill: bool,
) {
    let main = horizontal.main();
    let separator_span = if separator_fill {
        horizontal.root()
    } else {
        main
    };
    for index in 0..registry.len() {
        let Some((pane, separator)) = registry.pane_and_separator_mut(index) else {
            continue;
        };
        pane.geometry_mut().apply(BoundingUpdate::horizontal(
            0.0,
            horizontal.total_width,
            0.0,
        ));
        if let Some(separator) = separator {
            separator.geometry_mut().apply(BoundingUpdate::horizontal(
                separator_span.left,
                separator_span.width,
                separator_span.right,
            ));
        }
    }
}

/// Region of a pane addressed by `LayoutSnapshot::bounding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LayoutRegion {
    #[default]
    Root,
    Main,
    ValueAxis,
}

/// Committed geometry of one pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub pane_id: PaneId,
    pub kind: PaneKind,
    pub state: PaneState,
    pub visible: bool,
    pub root: Bounding,
    pub main: Bounding,
    pub value_axis: Option<Bounding>,
    pub separator: Option<Bounding>,
}

/// Immutable result of one layout pass.
///
/// `generation` increases with every committed pass so holders of an older
/// snapshot can tell it is stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LayoutSnapshot {
    pub generation: u64,
    pub chart: Bounding,
    pub horizontal: HorizontalLayout,
    pub panes: Vec<PaneLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: LayoutSnapshot,
}

impl LayoutSnapshot {
    #[must_use]
    pub fn capture(
        registry: &PaneRegistry,
        chart: Bounding,
        horizontal: HorizontalLayout,
        generation: u64,
    ) -> Self {
        let panes = registry
            .panes()
            .map(|pane| {
                let geometry = pane.geometry();
                let vertical = BoundingUpdate {
                    top: Some(geometry.top),
                    height: Some(geometry.height),
                    ..BoundingUpdate::default()
                };
                let value_axis = pane
                    .kind()
                    .has_value_axis()
                    .then(|| horizontal.axis(pane.axis().position).with(vertical));
                let separator = registry
                    .separator(pane.id())
                    .filter(|separator| separator.is_visible())
                    .map(|separator| separator.geometry());
                PaneLayout {
                    pane_id: pane.id().clone(),
                    kind: pane.kind(),
                    state: pane.state(),
                    visible: pane.is_visible(),
                    root: geometry,
                    main: horizontal.main().with(vertical),
                    value_axis,
                    separator,
                }
            })
            .collect();
        Self {
            generation,
            chart,
            horizontal,
            panes,
        }
    }

    #[must_use]
    pub fn pane(&self, pane_id: &PaneId) -> Option<&PaneLayout> {
        self.panes.iter().find(|layout| &layout.pane_id == pane_id)
    }

    /// Chart bounding when `pane_id` is `None`, otherwise the pane region.
    #[must_use]
    pub fn bounding(&self, pane_id: Option<&PaneId>, region: LayoutRegion) -> Option<Bounding> {
        let Some(pane_id) = pane_id else {
            return Some(self.chart);
        };
        let layout = self.pane(pane_id)?;
        match region {
            LayoutRegion::Root => Some(layout.root),
            LayoutRegion::Main => Some(layout.main),
            LayoutRegion::ValueAxis => layout.value_axis,
        }
    }

    /// Sum of visible pane and separator heights, time axis included.
    #[must_use]
    pub fn occupied_height(&self) -> f64 {
        self.panes
            .iter()
            .map(|layout| {
                let separator = layout.separator.map_or(0.0, |separator| separator.height);
                let pane = if layout.visible { layout.root.height } else { 0.0 };
                separator + pane
            })
            .sum()
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = LayoutSnapshotJsonContractV1 {
            schema_version: LAYOUT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize layout snapshot v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<LayoutSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: LayoutSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse layout snapshot json: {e}"))
        })?;
        if payload.schema_version != LAYOUT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported layout snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisMeasure, GutterWidths, measure_heights, measure_widths};
    use crate::core::{AxisPosition, PaneId, PaneKind, PaneOptions, PaneRegistry};

    fn registry_with_indicator(height: f64, min_height: f64) -> (PaneRegistry, PaneId) {
        let mut registry = PaneRegistry::default();
        let id = registry
            .add_pane(
                PaneKind::Indicator,
                None,
                PaneOptions {
                    height: Some(height),
                    min_height: Some(min_height),
                    ..PaneOptions::default()
                },
            )
            .expect("indicator pane");
        registry.sort();
        (registry, id)
    }

    #[test]
    fn candle_absorbs_space_left_by_fixed_panes() {
        let (mut registry, id) = registry_with_indicator(120.0, 60.0);
        measure_heights(&mut registry, 600.0, 30.0, 0.0);

        let candle = registry.candle().expect("candle");
        let indicator = registry.pane(&id).expect("indicator");
        let axis = registry.time_axis().expect("axis");
        assert_eq!(candle.geometry().height, 450.0);
        assert_eq!(candle.geometry().top, 0.0);
        assert_eq!(indicator.geometry().height, 120.0);
        assert_eq!(indicator.geometry().top, 450.0);
        assert_eq!(axis.geometry().top, 570.0);
        assert_eq!(axis.geometry().height, 30.0);
    }

    #[test]
    fn separators_consume_height_between_panes() {
        let (mut registry, id) = registry_with_indicator(100.0, 30.0);
        measure_heights(&mut registry, 500.0, 20.0, 2.0);

        let separator = registry.separator(&id).expect("separator");
        assert!(separator.is_visible());
        assert_eq!(separator.geometry().height, 2.0);
        let candle = registry.candle().expect("candle");
        assert_eq!(candle.geometry().height, 378.0);
        assert_eq!(separator.geometry().top, 378.0);
        assert_eq!(registry.pane(&id).expect("pane").geometry().top, 380.0);
    }

    #[test]
    fn oversized_panes_are_clipped_to_remaining_budget() {
        let (mut registry, id) = registry_with_indicator(1_000.0, 30.0);
        let candle_min = registry.candle().expect("candle").min_height();
        measure_heights(&mut registry, 300.0, 30.0, 0.0);
        assert_eq!(registry.pane(&id).expect("pane").height(), 270.0 - candle_min);
        assert_eq!(registry.candle().expect("candle").geometry().height, candle_min);
    }

    #[test]
    fn shrinking_container_keeps_candle_at_its_min_height() {
        let (mut registry, id) = registry_with_indicator(120.0, 60.0);
        measure_heights(&mut registry, 600.0, 30.0, 0.0);
        let candle_min = registry.candle().expect("candle").min_height();

        measure_heights(&mut registry, 150.0, 30.0, 0.0);

        let indicator = registry.pane(&id).expect("indicator").geometry().height;
        let candle = registry.candle().expect("candle").geometry().height;
        assert_eq!(candle, candle_min);
        assert_eq!(indicator, 120.0 - candle_min);
        assert!(indicator >= 60.0);
    }

    #[test]
    fn earlier_panes_leave_room_for_later_minimums() {
        let mut registry = PaneRegistry::default();
        for (name, height) in [("a", 300.0), ("b", 80.0)] {
            registry
                .add_pane(
                    PaneKind::Indicator,
                    Some(PaneId::new(name)),
                    PaneOptions {
                        height: Some(height),
                        min_height: Some(50.0),
                        ..PaneOptions::default()
                    },
                )
                .expect("indicator pane");
        }
        registry.sort();
        let candle_min = registry.candle().expect("candle").min_height();

        measure_heights(&mut registry, 230.0, 30.0, 0.0);

        let b = registry.pane(&PaneId::new("b")).expect("b").geometry().height;
        let a = registry.pane(&PaneId::new("a")).expect("a").geometry().height;
        assert_eq!(a, 200.0 - candle_min - 50.0);
        assert_eq!(b, 50.0);
        assert_eq!(registry.candle().expect("candle").geometry().height, candle_min);
    }

    #[test]
    fn impossible_geometry_clamps_to_zero() {
        let (mut registry, id) = registry_with_indicator(100.0, 30.0);
        measure_heights(&mut registry, 10.0, 30.0, 1.0);
        assert_eq!(registry.pane(&id).expect("pane").geometry().height, 0.0);
        assert_eq!(registry.candle().expect("candle").geometry().height, 0.0);
    }

    #[test]
    fn width_takes_max_per_side_and_respects_inside_axes() {
        let measures = [
            AxisMeasure {
                position: AxisPosition::Right,
                inside: false,
                width: 50.0,
            },
            AxisMeasure {
                position: AxisPosition::Right,
                inside: false,
                width: 64.0,
            },
            AxisMeasure {
                position: AxisPosition::Left,
                inside: true,
                width: 40.0,
            },
        ];
        let layout = measure_widths(&measures, 800.0, None);
        assert_eq!(layout.gutters.right, 64.0);
        assert_eq!(layout.gutters.left, 40.0);
        assert!(!layout.left_outside);
        assert!(layout.right_outside);
        assert_eq!(layout.main_left, 0.0);
        assert_eq!(layout.main_width, 736.0);
        assert_eq!(layout.main_right, 64.0);
    }

    #[test]
    fn cached_gutters_never_shrink() {
        let measures = [AxisMeasure {
            position: AxisPosition::Right,
            inside: false,
            width: 40.0,
        }];
        let cache = GutterWidths {
            left: 0.0,
            right: 70.0,
        };
        let cached = measure_widths(&measures, 800.0, Some(cache));
        assert_eq!(cached.gutters.right, 70.0);
        let fresh = measure_widths(&measures, 800.0, None);
        assert_eq!(fresh.gutters.right, 40.0);
    }
}
