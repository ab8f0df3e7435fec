use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Bounding, DataIndex, LayoutRegion, LayoutSnapshot, PaneId, PaneKind, ValueScale};
use crate::render::Renderer;

use super::ChartEngine;

/// One item or many; conversions keep the cardinality of their input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Batch<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Batch<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(items) if items.is_empty())
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Batch<U> {
        match self {
            Self::Single(item) => Batch::Single(f(item)),
            Self::Many(items) => Batch::Many(items.into_iter().map(f).collect()),
        }
    }

    /// Same cardinality, default content.
    fn emptied<U: Default>(&self) -> Batch<U> {
        match self {
            Self::Single(_) => Batch::Single(U::default()),
            Self::Many(_) => Batch::Many(Vec::new()),
        }
    }
}

/// Point in chart space. Missing fields stay missing in the result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default)]
    pub data_index: Option<DataIndex>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl ChartPoint {
    #[must_use]
    pub fn new(data_index: DataIndex, value: f64) -> Self {
        Self {
            data_index: Some(data_index),
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Offsets and value scale resolved once per conversion call.
struct PaneFrame {
    x_offset: f64,
    y_offset: f64,
    value_scale: Option<ValueScale>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Latest committed layout.
    #[must_use]
    pub fn layout_snapshot(&self) -> Arc<LayoutSnapshot> {
        Arc::clone(&self.core.model.snapshot)
    }

    #[must_use]
    pub fn layout_generation(&self) -> u64 {
        self.core.model.snapshot.generation
    }

    /// Committed bounding of a pane region, or of the chart when `pane_id`
    /// is `None`.
    #[must_use]
    pub fn bounding(&self, pane_id: Option<&PaneId>, region: LayoutRegion) -> Option<Bounding> {
        self.core.model.snapshot.bounding(pane_id, region)
    }

    /// Maps chart-space points on `pane_id` to pixels.
    ///
    /// Coordinates are relative to the pane (x from the main area's left
    /// edge, y from the pane top) unless `absolute` is set. Unknown panes
    /// yield an empty result; on the time-axis pane only x is resolved.
    #[must_use]
    pub fn convert_to_pixel(
        &self,
        points: Batch<ChartPoint>,
        pane_id: &PaneId,
        absolute: bool,
    ) -> Batch<PixelPoint> {
        let Some(frame) = self.pane_frame(pane_id, absolute) else {
            return points.emptied();
        };
        let index_scale = self.core.model.index_scale;
        points.map(|point| PixelPoint {
            x: point
                .data_index
                .map(|index| index_scale.data_index_to_pixel(index) + frame.x_offset),
            y: point.value.and_then(|value| {
                let scale = frame.value_scale?;
                scale
                    .value_to_pixel(value)
                    .ok()
                    .map(|y| y + frame.y_offset)
            }),
        })
    }

    /// Inverse of [`Self::convert_to_pixel`].
    #[must_use]
    pub fn convert_from_pixel(
        &self,
        points: Batch<PixelPoint>,
        pane_id: &PaneId,
        absolute: bool,
    ) -> Batch<ChartPoint> {
        let Some(frame) = self.pane_frame(pane_id, absolute) else {
            return points.emptied();
        };
        let index_scale = self.core.model.index_scale;
        points.map(|point| ChartPoint {
            data_index: point
                .x
                .filter(|x| x.is_finite())
                .map(|x| index_scale.pixel_to_data_index(x - frame.x_offset)),
            value: point.y.and_then(|y| {
                let scale = frame.value_scale?;
                scale.pixel_to_value(y - frame.y_offset).ok()
            }),
        })
    }

    fn pane_frame(&self, pane_id: &PaneId, absolute: bool) -> Option<PaneFrame> {
        let model = &self.core.model;
        let pane = model.registry.pane(pane_id)?;
        let layout = model.snapshot.pane(pane_id)?;
        let (x_offset, y_offset) = if absolute {
            (layout.main.left, layout.root.top)
        } else {
            (0.0, 0.0)
        };
        let value_scale = (pane.kind() != PaneKind::TimeAxis).then(|| pane.value_scale());
        Some(PaneFrame {
            x_offset,
            y_offset,
            value_scale,
        })
    }
}
