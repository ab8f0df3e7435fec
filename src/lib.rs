//! chart-panes: pane layout and update scheduling for multi-pane charts.
//!
//! The crate partitions a chart container into a candle pane, indicator and
//! script panes and a time-axis strip, coalesces layout requests into one
//! pass per flush, and converts between chart space and pixels.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, LayoutRequest};
pub use error::{ChartError, ChartResult};
