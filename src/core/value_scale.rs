use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Per-pane value axis mapped onto a downward-growing Y pixel axis.
///
/// Every content pane owns one of these; the same value maps to different
/// pixels on different panes because both the range and the laid-out height
/// are pane specific.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    from: f64,
    to: f64,
    height_px: f64,
    #[serde(default)]
    inverted: bool,
}

impl Default for ValueScale {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            height_px: 0.0,
            inverted: false,
        }
    }
}

impl ValueScale {
    pub fn new(from: f64, to: f64) -> ChartResult<Self> {
        let mut scale = Self::default();
        scale.set_range(from, to)?;
        Ok(scale)
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.from, self.to)
    }

    pub fn set_range(&mut self, from: f64, to: f64) -> ChartResult<()> {
        if !from.is_finite() || !to.is_finite() || from == to {
            return Err(ChartError::InvalidData(
                "value range must be finite and non-zero".to_owned(),
            ));
        }
        self.from = from.min(to);
        self.to = from.max(to);
        Ok(())
    }

    /// Fits the range to the given values with symmetric padding.
    pub fn fit_to_values(&mut self, values: &[f64], padding_ratio: f64) -> ChartResult<()> {
        if !padding_ratio.is_finite() || padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "value padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        let (min, max) = values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(value), max.max(value))
            });
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "value fit requires at least one finite value".to_owned(),
            ));
        }
        let span = if max > min { max - min } else { min.abs().max(1.0) };
        let pad = span * padding_ratio;
        let (from, to) = if max > min {
            (min - pad, max + pad)
        } else {
            (min - span / 2.0 - pad, max + span / 2.0 + pad)
        };
        self.set_range(from, to)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        self.height_px
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.inverted
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    pub(crate) fn set_height_px(&mut self, height_px: f64) {
        self.height_px = height_px.max(0.0);
    }

    /// Maps a value to a pane-relative Y pixel.
    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        let from_bottom = self.linear()?.domain_to_pixel(value, self.height_px)?;
        if self.inverted {
            Ok(from_bottom)
        } else {
            Ok(self.height_px - from_bottom)
        }
    }

    /// Maps a pane-relative Y pixel back to a value.
    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        let from_bottom = if self.inverted {
            pixel
        } else {
            self.height_px - pixel
        };
        self.linear()?.pixel_to_domain(from_bottom, self.height_px)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.from, self.to)
    }
}
