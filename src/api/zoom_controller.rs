use tracing::{debug, warn};

use crate::core::{AffineTransform2D, Clock, DataBounds};
use crate::error::ViewResult;
use crate::interaction::ZoomTransition;

use super::ViewportController;
use super::zoom_target_resolver::{resolve_bbox_zoom_target, resolve_point_zoom_target};

impl<C: Clock> ViewportController<C> {
    /// Starts a transition that centers data point `(x, y)` at `scale_factor`.
    ///
    /// The factor is clamped into the configured scale extent. Returns `None`
    /// and leaves the view untouched when no extent is known or the input is
    /// not finite.
    pub fn zoom_to_point(
        &mut self,
        scale_factor: f64,
        x: f64,
        y: f64,
        duration_ms: f64,
    ) -> Option<ZoomTransition> {
        let Some(base) = self.base_scales() else {
            warn!("zoom to point ignored: no dataset extent");
            return None;
        };
        let Some(target) = resolve_point_zoom_target(
            self.model.viewport,
            base,
            self.config.scale_extent,
            scale_factor,
            x,
            y,
        ) else {
            warn!(scale_factor, x, y, "zoom to point ignored: non-finite input");
            return None;
        };
        Some(self.begin_transition(target, duration_ms))
    }

    /// [`zoom_to_point`](Self::zoom_to_point) with the configured default duration.
    pub fn zoom_to_point_default(
        &mut self,
        scale_factor: f64,
        x: f64,
        y: f64,
    ) -> Option<ZoomTransition> {
        self.zoom_to_point(scale_factor, x, y, self.config.default_zoom_duration_ms)
    }

    /// Starts a transition fitting the data-space box `corners` into the view.
    ///
    /// The box fills `bbox_fill_ratio` of the viewport on its binding axis. A
    /// box with zero span on both axes only pans.
    pub fn zoom_to_bounding_box(
        &mut self,
        corners: DataBounds,
        duration_ms: f64,
    ) -> Option<ZoomTransition> {
        let Some(base) = self.base_scales() else {
            warn!("zoom to bounding box ignored: no dataset extent");
            return None;
        };
        let Some(target) = resolve_bbox_zoom_target(
            self.model.viewport,
            base,
            self.config.scale_extent,
            self.config.bbox_fill_ratio,
            self.model.transform.scale_factor(),
            corners,
        ) else {
            warn!(?corners, "zoom to bounding box ignored: non-finite input");
            return None;
        };
        Some(self.begin_transition(target, duration_ms))
    }

    pub fn zoom_to_bounding_box_default(&mut self, corners: DataBounds) -> Option<ZoomTransition> {
        self.zoom_to_bounding_box(corners, self.config.default_bbox_duration_ms)
    }

    /// Gesture path: replaces the live transform and extends the render loop.
    ///
    /// A user gesture interrupts any in-flight zoom transition so a later tick
    /// cannot snap the view back to its target. The scale factor is clamped
    /// into the configured extent. Transforms with non-finite components are
    /// ignored; returns whether the view changed.
    pub fn on_gesture_transform_changed(&mut self, transform: AffineTransform2D) -> bool {
        if !self.set_live_transform(transform) {
            return false;
        }
        if self.runtime.animation.complete().is_some() {
            debug!("zoom transition interrupted by gesture");
        }
        true
    }

    /// Animator path: feeds one interpolated step of the in-flight transition.
    ///
    /// Same clamping and timer extension as the gesture path, but the
    /// transition stays pending and still lands on its target.
    pub fn apply_transition_step(&mut self, transform: AffineTransform2D) -> bool {
        self.set_live_transform(transform)
    }

    fn set_live_transform(&mut self, transform: AffineTransform2D) -> bool {
        if !transform.is_invertible() || transform.scale_factor() <= 0.0 {
            warn!(?transform, "transform update ignored: not invertible");
            return false;
        }
        let extent = self.config.scale_extent;
        self.model.transform = transform.with_scale_clamped(extent.min, extent.max);
        self.restart_timer(self.config.gesture_idle_ms);
        true
    }

    /// Applies the in-flight transition's target and returns to idle.
    pub fn complete_transition(&mut self) -> Option<ZoomTransition> {
        let transition = self.runtime.animation.complete()?;
        self.model.transform = transition.target;
        debug!("zoom transition completed");
        Some(transition)
    }

    /// Drops the in-flight transition, keeping the transform where it is.
    pub fn cancel_transition(&mut self) -> Option<ZoomTransition> {
        let transition = self.runtime.animation.complete();
        if transition.is_some() {
            debug!("zoom transition cancelled");
        }
        transition
    }

    /// Jumps back to the identity transform and redraws.
    pub fn reset_zoom(&mut self) -> ViewResult<usize> {
        self.runtime.animation.complete();
        self.model.transform = AffineTransform2D::identity();
        self.redraw()
    }

    fn begin_transition(&mut self, target: AffineTransform2D, duration_ms: f64) -> ZoomTransition {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        let transition = ZoomTransition {
            start: self.model.transform,
            target,
            duration_ms,
            started_at_ms: self.clock.now_ms(),
        };
        debug!(
            target_k = target.scale_factor(),
            duration_ms, "zoom transition started"
        );
        self.runtime.animation.begin(transition);
        self.restart_timer(duration_ms);
        transition
    }

    /// Lands a transition whose duration elapsed. Returns whether one did.
    pub(super) fn settle_transition(&mut self, now_ms: f64) -> bool {
        match self.runtime.animation.settle(now_ms) {
            Some(transition) => {
                self.model.transform = transition.target;
                true
            }
            None => false,
        }
    }
}
