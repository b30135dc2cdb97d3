use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::Clock;
use crate::error::{ViewError, ViewResult};
use crate::render::{ViewportBinding, ViewportRenderer};

use super::ViewportController;
use super::view_state::RendererRef;

impl<C: Clock> ViewportController<C> {
    /// Registers a renderer under `key` without taking ownership of it.
    ///
    /// The renderer is bound to this viewport and initialized with the current
    /// view before it is stored. Registering an existing key replaces the
    /// previous entry; the return value reports whether that happened.
    pub fn register_renderer<R>(
        &mut self,
        key: &str,
        renderer: &Rc<RefCell<R>>,
    ) -> ViewResult<bool>
    where
        R: ViewportRenderer + 'static,
    {
        if key.is_empty() {
            return Err(ViewError::InvalidData(
                "renderer key must not be empty".to_owned(),
            ));
        }

        let frame = self.view_frame(true);
        {
            let mut target = renderer.try_borrow_mut().map_err(|_| {
                ViewError::InvalidData(format!("renderer `{key}` is already borrowed"))
            })?;
            target.bind_viewport(ViewportBinding {
                key: key.to_owned(),
                viewport: self.model.viewport,
            });
            target.initialize_viewport(&frame);
        }

        let shared: RendererRef = renderer.clone();
        let replaced = self
            .runtime
            .renderers
            .insert(key.to_owned(), Rc::downgrade(&shared))
            .is_some();
        if replaced {
            debug!(key, "replace registered renderer");
        } else {
            debug!(key, "register renderer");
        }
        Ok(replaced)
    }

    /// Unregisters a renderer by key. Returns `true` when removed.
    pub fn unregister_renderer(&mut self, key: &str) -> bool {
        let removed = self.runtime.renderers.shift_remove(key).is_some();
        if removed {
            debug!(key, "unregister renderer");
        }
        removed
    }

    /// Number of registered renderers that are still alive.
    #[must_use]
    pub fn renderer_count(&self) -> usize {
        self.runtime
            .renderers
            .values()
            .filter(|renderer| renderer.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn has_renderer(&self, key: &str) -> bool {
        self.runtime
            .renderers
            .get(key)
            .is_some_and(|renderer| renderer.strong_count() > 0)
    }

    /// Keys of live renderers in registration order.
    #[must_use]
    pub fn renderer_keys(&self) -> Vec<String> {
        self.runtime
            .renderers
            .iter()
            .filter(|(_, renderer)| renderer.strong_count() > 0)
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub(super) fn renderer(&self, key: &str) -> Option<RendererRef> {
        self.runtime.renderers.get(key)?.upgrade()
    }

    /// Live renderers in registration order; dropped ones are forgotten.
    pub(super) fn live_renderers(&mut self) -> Vec<(String, RendererRef)> {
        let before = self.runtime.renderers.len();
        self.runtime
            .renderers
            .retain(|_, renderer| renderer.strong_count() > 0);
        let pruned = before - self.runtime.renderers.len();
        if pruned > 0 {
            warn!(pruned, "dropped renderers removed from viewport");
        }
        self.runtime
            .renderers
            .iter()
            .filter_map(|(key, renderer)| renderer.upgrade().map(|live| (key.clone(), live)))
            .collect()
    }
}
