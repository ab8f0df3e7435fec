use tracing::trace;

use crate::core::{PaneId, PaneRegistry};

/// Applies `new_height` to `target`, absorbing the difference elsewhere so
/// the total stays constant.
///
/// The candle pane absorbs the whole change when it can; otherwise the change
/// is split evenly over the other normal panes. Whatever the absorbing panes
/// cannot take without dropping under their min height is taken back from
/// the target. Returns `false` when nothing was redistributed.
pub fn redistribute_height(registry: &mut PaneRegistry, target: &PaneId, new_height: f64) -> bool {
    let Some(current_height) = registry.pane(target).map(|pane| pane.height()) else {
        return false;
    };
    let change = new_height - current_height;
    if change == 0.0 || !change.is_finite() {
        return false;
    }

    let absorbers = registry.normal_pane_ids_except(target);
    let count = absorbers.len();
    if count == 0 {
        trace!(pane_id = %target, "no normal pane can absorb the resize");
        return false;
    }

    let mut applied_height = new_height;

    if !target.is_candle() {
        if let Some(candle) = registry
            .pane_mut(&PaneId::candle())
            .filter(|candle| candle.is_normal() && candle.height() > 0.0)
        {
            let min_height = candle.min_height();
            let mut candle_height = candle.height() - change;
            if candle_height < min_height {
                applied_height -= min_height - candle_height;
                candle_height = min_height;
            }
            candle.set_height(candle_height);
            set_target_height(registry, target, applied_height);
            return true;
        }
    }

    let share = (change / count as f64).floor();
    let mut remaining = change;
    for (index, pane_id) in absorbers.iter().enumerate() {
        let Some(pane) = registry.pane_mut(pane_id) else {
            continue;
        };
        let mut height = if index == count - 1 {
            pane.height() - remaining
        } else {
            pane.height() - share
        };
        remaining -= share;
        let min_height = pane.min_height();
        if height < min_height {
            applied_height -= min_height - height;
            height = min_height;
        }
        pane.set_height(height);
    }
    set_target_height(registry, target, applied_height);
    true
}

fn set_target_height(registry: &mut PaneRegistry, target: &PaneId, height: f64) {
    if let Some(pane) = registry.pane_mut(target) {
        pane.set_height(height);
    }
}
