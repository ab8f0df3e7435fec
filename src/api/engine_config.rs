use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_BAR_SPACE, PaneDefaults, Viewport};
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub pane_defaults: PaneDefaults,
    /// Display height of a minimized pane.
    #[serde(default = "default_minimized_pane_height")]
    pub minimized_pane_height: f64,
    #[serde(default = "default_separator_size")]
    pub separator_size: f64,
    /// Separators span the whole width instead of the main area.
    #[serde(default)]
    pub separator_fill: bool,
    /// Sizes reported by the built-in `FixedAxisProvider`.
    #[serde(default = "default_time_axis_height")]
    pub time_axis_height: f64,
    #[serde(default = "default_value_axis_width")]
    pub value_axis_width: f64,
    #[serde(default = "default_bar_space")]
    pub bar_space: f64,
    #[serde(default = "default_offset_right_distance")]
    pub offset_right_distance: f64,
    #[serde(default)]
    pub countdown_interval_ms: Option<u64>,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pane_defaults: PaneDefaults::default(),
            minimized_pane_height: default_minimized_pane_height(),
            separator_size: default_separator_size(),
            separator_fill: false,
            time_axis_height: default_time_axis_height(),
            value_axis_width: default_value_axis_width(),
            bar_space: default_bar_space(),
            offset_right_distance: default_offset_right_distance(),
            countdown_interval_ms: None,
        }
    }

    #[must_use]
    pub fn with_pane_defaults(mut self, height: f64, min_height: f64) -> Self {
        self.pane_defaults = PaneDefaults { height, min_height };
        self
    }

    #[must_use]
    pub fn with_minimized_pane_height(mut self, height: f64) -> Self {
        self.minimized_pane_height = height;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, size: f64, fill: bool) -> Self {
        self.separator_size = size;
        self.separator_fill = fill;
        self
    }

    /// Sets the sizes used by the default axis provider.
    #[must_use]
    pub fn with_axis_sizes(mut self, time_axis_height: f64, value_axis_width: f64) -> Self {
        self.time_axis_height = time_axis_height;
        self.value_axis_width = value_axis_width;
        self
    }

    #[must_use]
    pub fn with_bar_space(mut self, bar_space: f64) -> Self {
        self.bar_space = bar_space;
        self
    }

    #[must_use]
    pub fn with_offset_right_distance(mut self, distance_px: f64) -> Self {
        self.offset_right_distance = distance_px;
        self
    }

    #[must_use]
    pub fn with_countdown_interval_ms(mut self, interval_ms: Option<u64>) -> Self {
        self.countdown_interval_ms = interval_ms;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let defaults = self.pane_defaults;
        if !defaults.height.is_finite() || defaults.height <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "default pane height must be finite and > 0, got {}",
                defaults.height
            )));
        }
        for (name, value) in [
            ("default pane min height", defaults.min_height),
            ("minimized pane height", self.minimized_pane_height),
            ("separator size", self.separator_size),
            ("time axis height", self.time_axis_height),
            ("value axis width", self.value_axis_width),
            ("offset right distance", self.offset_right_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_minimized_pane_height() -> f64 {
    30.0
}

fn default_separator_size() -> f64 {
    1.0
}

fn default_time_axis_height() -> f64 {
    30.0
}

fn default_value_axis_width() -> f64 {
    60.0
}

fn default_bar_space() -> f64 {
    DEFAULT_BAR_SPACE
}

fn default_offset_right_distance() -> f64 {
    80.0
}
