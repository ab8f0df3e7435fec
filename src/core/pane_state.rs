use tracing::debug;

use crate::core::{PaneId, PaneKind, PaneRegistry, PaneState, redistribute_height};

/// Moves `pane_id` into `desired`, updating heights and visibility.
///
/// `content_height` is the container height minus the time-axis height and
/// `minimized_height` the display height of a minimized pane. Returns
/// whether the state actually changed.
pub fn transition_pane_state(
    registry: &mut PaneRegistry,
    pane_id: &PaneId,
    desired: PaneState,
    content_height: f64,
    minimized_height: f64,
) -> bool {
    let Some(pane) = registry.pane(pane_id) else {
        return false;
    };
    if pane.kind() == PaneKind::TimeAxis || pane.state() == desired {
        return false;
    }
    let previous = pane.state();
    let height = pane.height();

    match desired {
        PaneState::Maximized => {
            let other_maximized = registry
                .panes()
                .any(|other| other.state() == PaneState::Maximized && other.id() != pane_id);
            if other_maximized {
                debug!(pane_id = %pane_id, "maximize rejected: another pane is maximized");
                return false;
            }
            if let Some(pane) = registry.pane_mut(pane_id) {
                if previous == PaneState::Normal {
                    pane.set_original_height(height);
                }
                pane.set_pre_maximize_height(height);
                pane.set_state(PaneState::Maximized);
                pane.set_visible(true);
                pane.set_height(content_height.max(0.0));
            }
            for other in registry.panes_mut() {
                if other.kind() == PaneKind::TimeAxis || other.id() == pane_id {
                    continue;
                }
                if other.is_normal() {
                    let current = other.height();
                    other.set_original_height(current);
                }
                other.set_visible(false);
            }
        }
        PaneState::Minimized | PaneState::Normal => {
            let collapsing_height = match previous {
                PaneState::Maximized => pane.pre_maximize_height(),
                _ => height,
            };
            let can_absorb = registry.panes().any(|other| {
                other.kind() != PaneKind::TimeAxis
                    && other.id() != pane_id
                    && other.state() != PaneState::Minimized
            });
            if desired == PaneState::Minimized
                && !can_absorb
                && collapsing_height != minimized_height
            {
                debug!(pane_id = %pane_id, "minimize rejected: no normal pane can take the height");
                return false;
            }
            restore_other_maximized(registry, pane_id, minimized_height);
            let target_height = match desired {
                PaneState::Minimized => minimized_height,
                _ => registry
                    .pane(pane_id)
                    .map_or(height, |pane| pane.original_height()),
            };
            if let Some(pane) = registry.pane_mut(pane_id) {
                pane.set_state(desired);
                match previous {
                    PaneState::Normal => pane.set_original_height(height),
                    // Other panes kept their heights while this one was maximized.
                    PaneState::Maximized => {
                        let restored = pane.pre_maximize_height();
                        pane.set_height(restored);
                    }
                    PaneState::Minimized => {}
                }
            }
            redistribute_height(registry, pane_id, target_height);
            show_content_panes(registry);
        }
    }

    debug!(pane_id = %pane_id, from = ?previous, to = ?desired, "pane state changed");
    true
}

/// Forces the candle pane back to a visible, normal, full-height pane once it
/// is the only content pane left.
pub fn restore_sole_content_pane(registry: &mut PaneRegistry, content_height: f64) -> bool {
    if registry.len() != 2 {
        return false;
    }
    let Some(candle) = registry.pane_mut(&PaneId::candle()) else {
        return false;
    };
    candle.set_visible(true);
    candle.set_state(PaneState::Normal);
    candle.set_height(content_height.max(0.0));
    true
}

/// Returns a pane other than `pane_id` from maximized to normal so every
/// pane can be shown again.
fn restore_other_maximized(registry: &mut PaneRegistry, pane_id: &PaneId, minimized_height: f64) {
    let maximized = registry
        .panes()
        .find(|pane| pane.state() == PaneState::Maximized && pane.id() != pane_id)
        .map(|pane| pane.id().clone());
    if let Some(maximized) = maximized {
        transition_pane_state(registry, &maximized, PaneState::Normal, 0.0, minimized_height);
    }
}

fn show_content_panes(registry: &mut PaneRegistry) {
    for pane in registry.panes_mut() {
        if pane.kind() != PaneKind::TimeAxis {
            pane.set_visible(true);
        }
    }
}
