use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{LayoutPhase, LayoutRequest, LayoutTrace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchedulerState {
    #[default]
    Idle,
    /// A pass was requested and waits for the next `flush`.
    Pending,
    /// A pass is executing.
    Running,
}

/// Counters describing scheduler activity since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub reflows: u64,
    pub paints: u64,
    pub overlay_refreshes: u64,
    pub state_checks: u64,
    pub frames: u64,
    pub countdown_ticks: u64,
    pub render_failures: u64,
}

/// Post-layout work due on a frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameEffects {
    pub state_check: bool,
    pub overlay_refresh: bool,
    pub countdown: bool,
}

impl FrameEffects {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.state_check || self.overlay_refresh || self.countdown)
    }
}

/// Repeating timer advanced by frame timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CountdownTimer {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl CountdownTimer {
    /// First tick arms the timer; missed intervals collapse into one firing.
    fn tick(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            None => {
                self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
                false
            }
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
                true
            }
            Some(_) => false,
        }
    }
}

/// Two-stage coalescing queue.
///
/// Stage one is the pending layout request drained by `flush`; stage two are
/// the frame effects drained on the next animation frame. Both are plain
/// flags, so redundant requests collapse.
#[derive(Debug, Clone, Default)]
pub struct LayoutScheduler {
    state: SchedulerState,
    pending: LayoutRequest,
    effects: FrameEffects,
    countdown: Option<CountdownTimer>,
    last_trace: LayoutTrace,
    stats: FrameStats,
    destroyed: bool,
}

impl LayoutScheduler {
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn pending(&self) -> LayoutRequest {
        self.pending
    }

    #[must_use]
    pub fn pending_effects(&self) -> FrameEffects {
        self.effects
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[must_use]
    pub fn last_trace(&self) -> &[LayoutPhase] {
        &self.last_trace
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Merges `request`; returns `false` when it selects nothing or the
    /// scheduler was destroyed.
    pub fn request(&mut self, request: LayoutRequest) -> bool {
        if self.destroyed || request.is_none() {
            return false;
        }
        self.pending.merge(request);
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Pending;
        }
        trace!(state = ?self.state, pending = ?self.pending, "layout requested");
        true
    }

    /// Moves Pending to Running and hands out the merged request.
    pub fn begin_pass(&mut self) -> Option<LayoutRequest> {
        if self.destroyed || self.state != SchedulerState::Pending {
            return None;
        }
        self.state = SchedulerState::Running;
        Some(std::mem::take(&mut self.pending))
    }

    /// Closes a pass and schedules its frame effects.
    ///
    /// Requests merged while running keep the scheduler pending.
    pub fn finish_pass(&mut self, trace: LayoutTrace) {
        if self.state != SchedulerState::Running {
            return;
        }
        self.stats.reflows += 1;
        if trace.contains(&LayoutPhase::Paint) {
            self.stats.paints += 1;
        }
        self.last_trace = trace;
        self.state = if self.pending.is_none() {
            SchedulerState::Idle
        } else {
            SchedulerState::Pending
        };
        if !self.destroyed {
            self.effects.state_check = true;
            self.effects.overlay_refresh = true;
        }
    }

    /// Returns `false` when a refresh was already due this frame.
    pub fn request_overlay_refresh(&mut self) -> bool {
        if self.destroyed || self.effects.overlay_refresh {
            return false;
        }
        self.effects.overlay_refresh = true;
        true
    }

    pub fn set_countdown_interval(&mut self, interval_ms: Option<u64>) {
        if self.destroyed {
            return;
        }
        self.countdown = interval_ms
            .filter(|interval| *interval > 0)
            .map(|interval_ms| CountdownTimer {
                interval_ms,
                next_due_ms: None,
            });
    }

    #[must_use]
    pub fn countdown_interval(&self) -> Option<u64> {
        self.countdown.map(|timer| timer.interval_ms)
    }

    /// Drains the effects due at `now_ms` and resets both flags.
    pub fn take_frame_effects(&mut self, now_ms: u64) -> FrameEffects {
        if self.destroyed {
            return FrameEffects::default();
        }
        self.stats.frames += 1;
        let mut effects = std::mem::take(&mut self.effects);
        if let Some(timer) = self.countdown.as_mut() {
            effects.countdown = timer.tick(now_ms);
        }
        if effects.countdown {
            self.stats.countdown_ticks += 1;
        }
        if effects.state_check {
            self.stats.state_checks += 1;
        }
        effects
    }

    pub fn record_overlay_refresh(&mut self) {
        self.stats.overlay_refreshes += 1;
    }

    pub fn record_render_failure(&mut self) {
        self.stats.render_failures += 1;
    }

    /// Drops every scheduled pass, frame effect and timer for good.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.pending = LayoutRequest::none();
        self.effects = FrameEffects::default();
        self.countdown = None;
        self.state = SchedulerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{LayoutScheduler, SchedulerState};
    use crate::api::{LayoutPhase, LayoutRequest};

    #[test]
    fn requests_coalesce_into_one_pass() {
        let mut scheduler = LayoutScheduler::default();
        assert!(scheduler.request(LayoutRequest::repaint()));
        assert!(scheduler.request(LayoutRequest::resize()));
        assert_eq!(scheduler.state(), SchedulerState::Pending);

        let request = scheduler.begin_pass().expect("pending pass");
        assert_eq!(request, LayoutRequest::resize());
        assert_eq!(scheduler.state(), SchedulerState::Running);
        scheduler.finish_pass(smallvec![LayoutPhase::MeasureHeight, LayoutPhase::Paint]);

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.begin_pass().is_none());
        assert_eq!(scheduler.stats().reflows, 1);
        assert_eq!(scheduler.stats().paints, 1);
    }

    #[test]
    fn request_while_running_stays_pending_for_next_flush() {
        let mut scheduler = LayoutScheduler::default();
        scheduler.request(LayoutRequest::repaint());
        let _ = scheduler.begin_pass();
        assert!(scheduler.request(LayoutRequest::reflow()));
        assert_eq!(scheduler.state(), SchedulerState::Running);
        scheduler.finish_pass(smallvec![LayoutPhase::Paint]);
        assert_eq!(scheduler.state(), SchedulerState::Pending);
        assert_eq!(scheduler.begin_pass(), Some(LayoutRequest::reflow()));
    }

    #[test]
    fn empty_request_does_not_schedule() {
        let mut scheduler = LayoutScheduler::default();
        assert!(!scheduler.request(LayoutRequest::none()));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn overlay_refresh_is_idempotent_within_a_frame() {
        let mut scheduler = LayoutScheduler::default();
        assert!(scheduler.request_overlay_refresh());
        assert!(!scheduler.request_overlay_refresh());
        let effects = scheduler.take_frame_effects(16);
        assert!(effects.overlay_refresh);
        assert!(!effects.state_check);
        assert!(scheduler.take_frame_effects(32).is_empty());
    }

    #[test]
    fn countdown_fires_once_per_interval() {
        let mut scheduler = LayoutScheduler::default();
        scheduler.set_countdown_interval(Some(1_000));
        assert!(!scheduler.take_frame_effects(0).countdown);
        assert!(!scheduler.take_frame_effects(500).countdown);
        assert!(scheduler.take_frame_effects(1_000).countdown);
        assert!(!scheduler.take_frame_effects(1_100).countdown);
        assert!(scheduler.take_frame_effects(5_000).countdown);
        assert_eq!(scheduler.stats().countdown_ticks, 2);
    }

    #[test]
    fn destroy_cancels_everything() {
        let mut scheduler = LayoutScheduler::default();
        scheduler.set_countdown_interval(Some(10));
        scheduler.request(LayoutRequest::full());
        scheduler.request_overlay_refresh();
        scheduler.destroy();

        assert!(scheduler.begin_pass().is_none());
        assert!(!scheduler.request(LayoutRequest::full()));
        assert!(scheduler.take_frame_effects(100).is_empty());
        assert_eq!(scheduler.countdown_interval(), None);
        assert_eq!(scheduler.stats().frames, 0);
    }
}
