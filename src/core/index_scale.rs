use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub type DataIndex = i64;

pub const DEFAULT_BAR_SPACE: f64 = 8.0;
pub const MIN_BAR_SPACE: f64 = 1.0;
pub const MAX_BAR_SPACE: f64 = 50.0;

/// Half-open range of data indices currently inside the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: DataIndex,
    pub to: DataIndex,
}

impl VisibleRange {
    #[must_use]
    pub fn contains(self, index: DataIndex) -> bool {
        self.from <= index && index < self.to
    }

    #[must_use]
    pub fn len(self) -> usize {
        usize::try_from(self.to - self.from).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.to <= self.from
    }
}

/// Shared horizontal axis mapping data indices to X pixels.
///
/// The axis is anchored on the right edge of the main area: the last bar
/// sits `right_offset_bars` bar slots away from it, and every bar occupies
/// one `bar_space` wide slot whose centre is the bar's coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexScale {
    width_px: f64,
    bar_space: f64,
    right_offset_bars: f64,
    data_len: usize,
}

impl Default for IndexScale {
    fn default() -> Self {
        Self {
            width_px: 0.0,
            bar_space: DEFAULT_BAR_SPACE,
            right_offset_bars: 0.0,
            data_len: 0,
        }
    }
}

impl IndexScale {
    pub fn new(bar_space: f64, offset_right_distance_px: f64) -> ChartResult<Self> {
        let mut scale = Self::default();
        scale.set_bar_space(bar_space)?;
        scale.set_offset_right_distance(offset_right_distance_px)?;
        Ok(scale)
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.width_px
    }

    pub(crate) fn set_width_px(&mut self, width_px: f64) {
        self.width_px = width_px.max(0.0);
    }

    #[must_use]
    pub fn bar_space(self) -> f64 {
        self.bar_space
    }

    pub fn set_bar_space(&mut self, bar_space: f64) -> ChartResult<()> {
        if !bar_space.is_finite() || !(MIN_BAR_SPACE..=MAX_BAR_SPACE).contains(&bar_space) {
            return Err(ChartError::InvalidData(format!(
                "bar space must be within [{MIN_BAR_SPACE}, {MAX_BAR_SPACE}]"
            )));
        }
        self.bar_space = bar_space;
        Ok(())
    }

    #[must_use]
    pub fn data_len(self) -> usize {
        self.data_len
    }

    pub fn set_data_len(&mut self, data_len: usize) {
        self.data_len = data_len;
    }

    /// Pixel gap between the last bar slot and the right edge of the main area.
    #[must_use]
    pub fn offset_right_distance(self) -> f64 {
        self.right_offset_bars * self.bar_space
    }

    pub fn set_offset_right_distance(&mut self, distance_px: f64) -> ChartResult<()> {
        if !distance_px.is_finite() || distance_px < 0.0 {
            return Err(ChartError::InvalidData(
                "offset right distance must be finite and >= 0".to_owned(),
            ));
        }
        self.right_offset_bars = distance_px / self.bar_space;
        Ok(())
    }

    /// X coordinate of the centre of the bar at `index`.
    #[must_use]
    pub fn data_index_to_pixel(self, index: DataIndex) -> f64 {
        let delta_from_right = self.data_len as f64 + self.right_offset_bars - index as f64;
        self.width_px - (delta_from_right - 0.5) * self.bar_space
    }

    /// Fractional index at `x`; bar `i` spans `(i, i + 1]`.
    #[must_use]
    pub fn pixel_to_float_index(self, x: f64) -> f64 {
        let delta_from_right = (self.width_px - x) / self.bar_space;
        let index = self.data_len as f64 + self.right_offset_bars - delta_from_right;
        (index * 1_000_000.0).round() / 1_000_000.0
    }

    #[must_use]
    pub fn pixel_to_data_index(self, x: f64) -> DataIndex {
        self.pixel_to_float_index(x).ceil() as DataIndex - 1
    }

    #[must_use]
    pub fn visible_range(self) -> VisibleRange {
        let len = self.data_len as DataIndex;
        if len == 0 || self.width_px <= 0.0 {
            return VisibleRange { from: 0, to: 0 };
        }
        let from = (self.pixel_to_float_index(0.0).floor() as DataIndex).clamp(0, len);
        let to = (self.pixel_to_float_index(self.width_px).ceil() as DataIndex).clamp(0, len);
        VisibleRange { from, to }
    }

    /// Shifts the visible window; positive `distance_px` reveals older bars.
    pub fn scroll_by_pixels(&mut self, distance_px: f64) -> ChartResult<()> {
        if !distance_px.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll distance must be finite".to_owned(),
            ));
        }
        self.right_offset_bars -= distance_px / self.bar_space;
        Ok(())
    }

    /// Scales bar spacing by `factor`, keeping the bar under `anchor_x` fixed.
    pub fn zoom_at(&mut self, factor: f64, anchor_x: f64) -> ChartResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor_x.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        let anchor_index = self.pixel_to_float_index(anchor_x);
        let bar_space = (self.bar_space * factor).clamp(MIN_BAR_SPACE, MAX_BAR_SPACE);
        self.bar_space = bar_space;
        self.right_offset_bars =
            anchor_index - self.data_len as f64 + (self.width_px - anchor_x) / bar_space;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexScale, VisibleRange};

    fn scale_with_data(len: usize) -> IndexScale {
        let mut scale = IndexScale::new(10.0, 0.0).expect("valid scale");
        scale.set_width_px(500.0);
        scale.set_data_len(len);
        scale
    }

    #[test]
    fn last_bar_sits_half_a_slot_left_of_right_edge() {
        let scale = scale_with_data(100);
        assert!((scale.data_index_to_pixel(99) - 495.0).abs() <= 1e-9);
        assert!((scale.data_index_to_pixel(98) - 485.0).abs() <= 1e-9);
    }

    #[test]
    fn pixel_to_index_inverts_bar_centres_and_slot_edges() {
        let scale = scale_with_data(100);
        for index in 50..100 {
            let x = scale.data_index_to_pixel(index);
            assert_eq!(scale.pixel_to_data_index(x), index);
            assert_eq!(scale.pixel_to_data_index(x + 4.9), index);
            assert_eq!(scale.pixel_to_data_index(x - 4.9), index);
        }
    }

    #[test]
    fn visible_range_clamps_to_data() {
        let scale = scale_with_data(100);
        assert_eq!(scale.visible_range(), VisibleRange { from: 50, to: 100 });
        let short = scale_with_data(10);
        assert_eq!(short.visible_range(), VisibleRange { from: 0, to: 10 });
    }

    #[test]
    fn offset_right_distance_rejects_negative_values() {
        let mut scale = scale_with_data(10);
        assert!(scale.set_offset_right_distance(-1.0).is_err());
        scale.set_offset_right_distance(40.0).expect("offset");
        assert!((scale.offset_right_distance() - 40.0).abs() <= 1e-9);
        assert!((scale.data_index_to_pixel(9) - 455.0).abs() <= 1e-9);
    }

    #[test]
    fn zoom_keeps_anchor_bar_in_place() {
        let mut scale = scale_with_data(100);
        let anchor_x = scale.data_index_to_pixel(80);
        scale.zoom_at(2.0, anchor_x).expect("zoom");
        assert!((scale.bar_space() - 20.0).abs() <= 1e-9);
        assert!((scale.data_index_to_pixel(80) - anchor_x).abs() <= 1e-6);
    }

    #[test]
    fn scroll_reveals_older_bars() {
        let mut scale = scale_with_data(100);
        let before = scale.data_index_to_pixel(60);
        scale.scroll_by_pixels(30.0).expect("scroll");
        assert!((scale.data_index_to_pixel(60) - before - 30.0).abs() <= 1e-9);
        assert_eq!(scale.visible_range().from, 47);
    }
}
