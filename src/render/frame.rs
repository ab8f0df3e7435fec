use std::sync::Arc;

use crate::core::{LayoutSnapshot, VisibleRange};
use crate::error::{ChartError, ChartResult};

/// Input of one paint: the committed layout plus the visible data window.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub snapshot: Arc<LayoutSnapshot>,
    pub visible_range: VisibleRange,
}

impl RenderFrame {
    #[must_use]
    pub fn new(snapshot: Arc<LayoutSnapshot>, visible_range: VisibleRange) -> Self {
        Self {
            snapshot,
            visible_range,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.snapshot.generation
    }

    pub fn validate(&self) -> ChartResult<()> {
        let chart = self.snapshot.chart;
        if !(chart.width.is_finite() && chart.height.is_finite())
            || chart.width < 0.0
            || chart.height < 0.0
        {
            return Err(ChartError::InvalidData(format!(
                "chart bounding must be finite and non-negative: {}x{}",
                chart.width, chart.height
            )));
        }

        for pane in &self.snapshot.panes {
            let root = pane.root;
            if !root.top.is_finite() || !root.height.is_finite() || root.height < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "pane `{}` has invalid geometry: top={} height={}",
                    pane.pane_id, root.top, root.height
                )));
            }
        }
        Ok(())
    }

    /// Panes that occupy vertical space in this frame.
    pub fn painted_panes(&self) -> impl Iterator<Item = &crate::core::PaneLayout> {
        self.snapshot
            .panes
            .iter()
            .filter(|pane| pane.visible && pane.root.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RenderFrame;
    use crate::core::{Bounding, LayoutSnapshot, VisibleRange};

    #[test]
    fn negative_chart_size_fails_validation() {
        let snapshot = LayoutSnapshot {
            chart: Bounding {
                width: -1.0,
                ..Bounding::default()
            },
            ..LayoutSnapshot::default()
        };
        let frame = RenderFrame::new(Arc::new(snapshot), VisibleRange { from: 0, to: 0 });
        assert!(frame.validate().is_err());
    }
}
