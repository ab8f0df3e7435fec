use serde::{Deserialize, Serialize};

/// Size of the chart container in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Container rectangle anchored at the origin.
    #[must_use]
    pub fn bounding(self) -> Bounding {
        Bounding {
            top: 0.0,
            left: 0.0,
            width: f64::from(self.width),
            height: f64::from(self.height),
            right: 0.0,
        }
    }
}

/// Axis-aligned rectangle produced by the layout pass.
///
/// `right` is the distance from the right edge of the container, which lets
/// consumers anchor right-side gutters without recomputing widths.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounding {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub right: f64,
}

impl Bounding {
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Returns a copy with the fields present in `update` replaced.
    #[must_use]
    pub fn with(mut self, update: BoundingUpdate) -> Self {
        self.apply(update);
        self
    }

    pub fn apply(&mut self, update: BoundingUpdate) {
        if let Some(top) = update.top {
            self.top = top;
        }
        if let Some(left) = update.left {
            self.left = left;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(right) = update.right {
            self.right = right;
        }
    }
}

/// Partial rectangle update: unset fields keep their previous value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingUpdate {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub right: Option<f64>,
}

impl BoundingUpdate {
    #[must_use]
    pub fn top(top: f64) -> Self {
        Self {
            top: Some(top),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn horizontal(left: f64, width: f64, right: f64) -> Self {
        Self {
            left: Some(left),
            width: Some(width),
            right: Some(right),
            ..Self::default()
        }
    }
}
