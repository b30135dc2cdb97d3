use tracing::debug;

use crate::core::{AffineTransform2D, Clock, SystemClock, Viewport};
use crate::error::ViewResult;
use crate::interaction::{PointerResolver, ViewportMode, ZoomTransition};

use super::ViewportControllerConfig;
use super::view_state::{ViewModel, ViewRuntime};

/// Main orchestration facade consumed by host applications.
///
/// `ViewportController` owns the live pan/zoom transform and the base-scale
/// cache, builds zoom transitions, keeps the idle render loop alive while the
/// view moves, and resolves hover picks through a registered renderer.
/// Everything runs on the host's event loop; nothing here blocks.
pub struct ViewportController<C: Clock = SystemClock> {
    pub(super) config: ViewportControllerConfig,
    pub(super) model: ViewModel,
    pub(super) runtime: ViewRuntime,
    pub(super) clock: C,
}

impl ViewportController<SystemClock> {
    /// Creates a controller driven by the monotonic system clock.
    pub fn new(config: ViewportControllerConfig) -> ViewResult<Self> {
        Self::with_clock(config, SystemClock::default())
    }
}

impl<C: Clock> ViewportController<C> {
    /// Creates a controller with an explicit time source.
    pub fn with_clock(config: ViewportControllerConfig, clock: C) -> ViewResult<Self> {
        config.validate()?;
        let pointer = PointerResolver::new(config.pointer_debounce_ms, config.annotation_offset);
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "create viewport controller"
        );
        Ok(Self {
            model: ViewModel::new(config.viewport),
            runtime: ViewRuntime::new(pointer),
            config,
            clock,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ViewportControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.model.viewport
    }

    /// Re-issues the surface size; base scales are re-derived on next access.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ViewResult<()> {
        let viewport = viewport.ensure_valid()?;
        if viewport == self.model.viewport {
            return Ok(());
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "resize viewport"
        );
        self.model.viewport = viewport;
        self.config.viewport = viewport;
        self.model.invalidate_scales();
        Ok(())
    }

    #[must_use]
    pub fn transform(&self) -> AffineTransform2D {
        self.model.transform
    }

    #[must_use]
    pub fn mode(&self) -> ViewportMode {
        self.runtime.animation.mode()
    }

    #[must_use]
    pub fn active_transition(&self) -> Option<ZoomTransition> {
        self.runtime.animation.transition()
    }
}
