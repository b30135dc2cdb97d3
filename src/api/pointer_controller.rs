use tracing::{trace, warn};

use crate::core::{Axis, Clock, DataPoint, DataRecord};
use crate::interaction::{AnnotationPoint, PointerResolution};

use super::ViewportController;
use super::label_text_formatter::format_label_text;

impl<C: Clock> ViewportController<C> {
    /// Resolves the pointer at `(x, y)` to the nearest data point.
    ///
    /// Moves closer together than the debounce interval are dropped and leave
    /// the current annotation untouched. Accepted moves either replace it
    /// with a single annotation or clear it when nothing is under the pointer.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerResolution {
        let now_ms = self.clock.now_ms();
        let picker = self.renderer(&self.config.pick_renderer_key);
        let resolution = self.runtime.pointer.resolve(now_ms, x, y, |px, py| {
            let renderer = picker.as_ref()?;
            match renderer.try_borrow() {
                Ok(renderer) => renderer.pick_nearest(px, py),
                Err(_) => {
                    warn!("pick renderer busy; pointer move unresolved");
                    None
                }
            }
        });

        match &resolution {
            PointerResolution::Dropped => {}
            PointerResolution::Annotated(annotation) => {
                let mut annotation = annotation.clone();
                annotation.anchor = self.annotation_anchor(&annotation.record);
                trace!(x, y, anchor = ?annotation.anchor, "pointer resolved to point");
                self.runtime.annotations.clear();
                self.runtime.annotations.push(annotation.clone());
                return PointerResolution::Annotated(annotation);
            }
            PointerResolution::Cleared => {
                trace!(x, y, "pointer resolved to nothing");
                self.runtime.annotations.clear();
            }
        }
        resolution
    }

    /// Clears hover annotations and restarts the debounce window.
    pub fn pointer_leave(&mut self) {
        self.runtime.annotations.clear();
        self.runtime.pointer.reset();
    }

    #[must_use]
    pub fn annotations(&self) -> &[AnnotationPoint] {
        &self.runtime.annotations
    }

    /// Label text for `annotation` using the configured field filter.
    #[must_use]
    pub fn annotation_label(&self, annotation: &AnnotationPoint) -> String {
        format_label_text(
            &annotation.record,
            self.config.label_fields.as_deref(),
            self.config.label_format,
        )
    }

    #[must_use]
    pub fn annotation_labels(&self) -> Vec<String> {
        self.runtime
            .annotations
            .iter()
            .map(|annotation| self.annotation_label(annotation))
            .collect()
    }

    /// Forwards a click on the current annotation to the pick renderer.
    ///
    /// Returns `false` when nothing is annotated or the renderer is gone.
    pub fn click_annotation(&mut self) -> bool {
        let Some(annotation) = self.runtime.annotations.first() else {
            return false;
        };
        let Some(renderer) = self.renderer(&self.config.pick_renderer_key) else {
            return false;
        };
        let Ok(mut renderer) = renderer.try_borrow_mut() else {
            warn!("pick renderer busy; click dropped");
            return false;
        };
        renderer.on_point_click(&annotation.record);
        true
    }

    fn annotation_anchor(&self, record: &DataRecord) -> Option<DataPoint> {
        let renderer = self.renderer(&self.config.pick_renderer_key)?;
        let renderer = renderer.try_borrow().ok()?;
        let x = renderer.field_value(Axis::X, record)?;
        let y = renderer.field_value(Axis::Y, record)?;
        self.data_to_pixel(DataPoint::new(x, y))
    }
}
