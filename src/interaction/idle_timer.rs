use serde::{Deserialize, Serialize};

/// Identifies one tick stream started by [`IdleExtendingTimer::restart`].
///
/// Every restart issues a new handle; ticks carrying an older handle belong
/// to a stopped stream and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle(u64);

impl TickHandle {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Renderers should be notified.
    Notify,
    /// The deadline passed; the timer stopped itself.
    Expired,
    /// The handle belongs to a replaced or stopped stream.
    Stale,
    /// No stream is running and the tick was not forced.
    Inactive,
}

/// Extendable tick stream with a monotonic "run until" deadline.
///
/// `restart` never shortens a running deadline and always replaces the
/// previous stream, so at most one handle is live at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleExtendingTimer {
    deadline_ms: f64,
    active: bool,
    generation: u64,
}

impl Default for IdleExtendingTimer {
    fn default() -> Self {
        Self {
            deadline_ms: f64::NEG_INFINITY,
            active: false,
            generation: 0,
        }
    }
}

impl IdleExtendingTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps ticks flowing until at least `now_ms + min_duration_ms`.
    ///
    /// Negative or non-finite durations count as zero.
    pub fn restart(&mut self, now_ms: f64, min_duration_ms: f64) -> TickHandle {
        let min_duration_ms = if min_duration_ms.is_finite() {
            min_duration_ms.max(0.0)
        } else {
            0.0
        };
        let requested = now_ms + min_duration_ms;
        // Only a running stream's deadline can outlast the request.
        let stop_at = if self.active && self.deadline_ms > requested {
            self.deadline_ms
        } else {
            requested
        };

        self.stop();
        self.generation += 1;
        self.active = true;
        self.deadline_ms = stop_at;
        TickHandle(self.generation)
    }

    /// Scheduler callback for the stream identified by `handle`.
    ///
    /// `forced` skips the deadline check, but never revives a stale handle.
    pub fn tick(&mut self, handle: TickHandle, now_ms: f64, forced: bool) -> TickOutcome {
        if handle.0 != self.generation {
            return TickOutcome::Stale;
        }
        if forced {
            return TickOutcome::Notify;
        }
        if !self.active {
            return TickOutcome::Inactive;
        }
        if self.deadline_ms <= now_ms {
            self.stop();
            return TickOutcome::Expired;
        }
        TickOutcome::Notify
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms.is_finite().then_some(self.deadline_ms)
    }

    /// Handle of the running stream, if any.
    #[must_use]
    pub fn current_handle(&self) -> Option<TickHandle> {
        self.active.then_some(TickHandle(self.generation))
    }

    #[must_use]
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        if !self.active {
            return 0.0;
        }
        (self.deadline_ms - now_ms).max(0.0)
    }
}
