//! Engine facade: pane CRUD, layout scheduling and coordinate conversion.

mod chart_model;
mod chart_runtime;
mod coordinate_controller;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod layout_coordinator;
mod layout_request;
mod layout_scheduler;
mod pane_controller;
mod pane_state_controller;
mod plugin_dispatch;
mod plugin_registry;

pub use coordinate_controller::{Batch, ChartPoint, PixelPoint};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use layout_request::{LayoutPhase, LayoutRequest, LayoutTrace};
pub use layout_scheduler::{FrameEffects, FrameStats, LayoutScheduler, SchedulerState};
