pub mod index_scale;
pub mod layout;
pub mod pane;
pub mod pane_registry;
pub mod pane_resize;
pub mod pane_state;
pub mod scale;
pub mod types;
pub mod value_scale;

pub use index_scale::{
    DEFAULT_BAR_SPACE, DataIndex, IndexScale, MAX_BAR_SPACE, MIN_BAR_SPACE, VisibleRange,
};
pub use layout::{
    AxisMeasure, GutterWidths, HorizontalLayout, LayoutRegion, LayoutSnapshot, PaneLayout,
    apply_horizontal_layout, measure_heights, measure_widths,
};
pub use pane::{
    AxisOptions, AxisPosition, AxisSize, CANDLE_PANE_ID, Pane, PaneId, PaneInfo, PaneKind,
    PaneOptions, PaneOptionsUpdate, PaneState, TIME_AXIS_ORDER, TIME_AXIS_PANE_ID,
};
pub use pane_registry::{PaneDefaults, PaneRegistry, Separator};
pub use pane_resize::redistribute_height;
pub use pane_state::{restore_sole_content_pane, transition_pane_state};
pub use scale::LinearScale;
pub use types::{Bounding, BoundingUpdate, Viewport};
pub use value_scale::ValueScale;
