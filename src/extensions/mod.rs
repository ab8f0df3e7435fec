mod collaborators;
mod plugins;

pub use collaborators::{
    AxisProvider, ContentCounts, ContentKind, ContentRegistry, ContentTracker, FixedAxisProvider,
};
pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
