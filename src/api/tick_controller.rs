use tracing::{debug, trace, warn};

use crate::core::Clock;
use crate::error::{ViewError, ViewResult};
use crate::interaction::{IdleExtendingTimer, TickHandle, TickOutcome};

use super::ViewportController;

impl<C: Clock> ViewportController<C> {
    /// Keeps the render loop ticking for at least `min_duration_ms` from now.
    ///
    /// A later deadline that is already scheduled wins. The returned handle
    /// replaces any previous one; the host scheduler should drive
    /// [`tick`](Self::tick) with it until the outcome is no longer `Notify`.
    pub fn restart_timer(&mut self, min_duration_ms: f64) -> TickHandle {
        let now_ms = self.clock.now_ms();
        let handle = self.runtime.timer.restart(now_ms, min_duration_ms);
        debug!(
            generation = handle.generation(),
            deadline_ms = ?self.runtime.timer.deadline_ms(),
            "restart idle timer"
        );
        handle
    }

    pub fn stop_timer(&mut self) {
        if self.runtime.timer.is_active() {
            debug!("stop idle timer");
        }
        self.runtime.timer.stop();
    }

    #[must_use]
    pub fn timer(&self) -> &IdleExtendingTimer {
        &self.runtime.timer
    }

    /// Scheduler callback: notifies renderers unless the loop went idle.
    pub fn tick(&mut self, handle: TickHandle) -> ViewResult<TickOutcome> {
        self.tick_with(handle, false)
    }

    /// Like [`tick`](Self::tick); `forced` skips the idle deadline check.
    pub fn tick_with(&mut self, handle: TickHandle, forced: bool) -> ViewResult<TickOutcome> {
        let now_ms = self.clock.now_ms();
        let outcome = self.runtime.timer.tick(handle, now_ms, forced);
        match outcome {
            TickOutcome::Notify => {
                self.settle_transition(now_ms);
                self.notify_renderers(forced)?;
            }
            TickOutcome::Expired => {
                debug!(generation = handle.generation(), "idle timer expired");
                // The loop stops here; show where an unfinished zoom landed.
                if self.settle_transition(now_ms) {
                    self.notify_renderers(true)?;
                }
            }
            TickOutcome::Stale | TickOutcome::Inactive => {
                trace!(generation = handle.generation(), ?outcome, "tick ignored");
            }
        }
        Ok(outcome)
    }

    /// Redraws every renderer once, outside the idle loop.
    ///
    /// Returns the number of renderers notified.
    pub fn redraw(&mut self) -> ViewResult<usize> {
        self.notify_renderers(true)
    }

    fn notify_renderers(&mut self, forced: bool) -> ViewResult<usize> {
        let frame = self.view_frame(forced);
        let renderers = self.live_renderers();
        let mut notified = 0;
        for (key, renderer) in renderers {
            let Ok(mut target) = renderer.try_borrow_mut() else {
                warn!(key = %key, "renderer busy; skipping tick");
                continue;
            };
            if let Err(err) = target.render(&frame) {
                warn!(key = %key, error = %err, "renderer failed; stopping idle timer");
                drop(target);
                self.runtime.timer.stop();
                return Err(ViewError::RendererFailed {
                    key,
                    reason: err.to_string(),
                });
            }
            notified += 1;
        }
        trace!(notified, forced, "renderers notified");
        Ok(notified)
    }
}
