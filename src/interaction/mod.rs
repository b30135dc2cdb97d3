mod idle_timer;
mod pointer;

pub use idle_timer::{IdleExtendingTimer, TickHandle, TickOutcome};
pub use pointer::{AnnotationPoint, PointerResolution, PointerResolver};

use serde::{Deserialize, Serialize};

use crate::core::AffineTransform2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportMode {
    Idle,
    Animating,
}

/// Animated move from the live transform to a zoom target.
///
/// The controller only builds the endpoints; interpolating between them is
/// the host animator's job. Each interpolated step is fed back through
/// `ViewportController::apply_transition_step`; a user gesture interrupts it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransition {
    pub start: AffineTransform2D,
    pub target: AffineTransform2D,
    pub duration_ms: f64,
    pub started_at_ms: f64,
}

impl ZoomTransition {
    #[must_use]
    pub fn ends_at_ms(&self) -> f64 {
        self.started_at_ms + self.duration_ms
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.ends_at_ms()
    }
}

/// Animation state owned by the viewport controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    transition: Option<ZoomTransition>,
}

impl AnimationState {
    #[must_use]
    pub fn mode(self) -> ViewportMode {
        if self.transition.is_some() {
            ViewportMode::Animating
        } else {
            ViewportMode::Idle
        }
    }

    #[must_use]
    pub fn transition(self) -> Option<ZoomTransition> {
        self.transition
    }

    pub fn begin(&mut self, transition: ZoomTransition) {
        self.transition = Some(transition);
    }

    /// Ends the transition; returns the one that was in flight.
    pub fn complete(&mut self) -> Option<ZoomTransition> {
        self.transition.take()
    }

    /// Completes the transition when its duration elapsed by `now_ms`.
    pub fn settle(&mut self, now_ms: f64) -> Option<ZoomTransition> {
        match self.transition {
            Some(transition) if transition.is_finished(now_ms) => self.complete(),
            _ => None,
        }
    }
}
