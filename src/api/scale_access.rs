use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{
    BaseScales, Clock, DataBounds, DataExtent, DataPoint, ExtentSource, ScaleSet, WindowMatrix,
};
use crate::render::ViewFrame;

use super::ViewportController;
use super::view_state::CachedBaseScales;

impl<C: Clock> ViewportController<C> {
    /// Attaches the dataset that supplies the data extent.
    ///
    /// Replacing a dataset drops the cached base scales.
    pub fn attach_dataset(&mut self, dataset: Rc<dyn ExtentSource>) {
        debug!(has_extent = dataset.extent().is_some(), "attach dataset");
        self.model.dataset = Some(dataset);
        self.model.invalidate_scales();
    }

    pub fn detach_dataset(&mut self) {
        if self.model.dataset.take().is_some() {
            debug!("detach dataset");
        }
        self.model.invalidate_scales();
    }

    #[must_use]
    pub fn has_dataset(&self) -> bool {
        self.model.dataset.is_some()
    }

    /// Extent reported by the attached dataset, if it has one yet.
    #[must_use]
    pub fn extent(&self) -> Option<DataExtent> {
        self.model.dataset.as_ref()?.extent()
    }

    /// Aspect-corrected scales ignoring the live zoom.
    ///
    /// Cached until the extent or the viewport changes.
    #[must_use]
    pub fn base_scales(&self) -> Option<BaseScales> {
        let extent = self.extent()?;
        let viewport = self.model.viewport;

        if let Some(cached) = *self.model.scale_cache.borrow() {
            if cached.extent == extent && cached.viewport == viewport {
                return Some(cached.base);
            }
        }

        let base = match BaseScales::derive(extent, viewport) {
            Ok(base) => base,
            Err(err) => {
                warn!(error = %err, "failed to derive base scales");
                return None;
            }
        };
        debug!(
            x_buffer_px = base.x_buffer_px,
            y_buffer_px = base.y_buffer_px,
            "derive base scales"
        );
        *self.model.scale_cache.borrow_mut() = Some(CachedBaseScales {
            extent,
            viewport,
            base,
        });
        Some(base)
    }

    /// Base scales plus their variants under the live transform.
    ///
    /// `None` until a dataset with a known extent is attached.
    #[must_use]
    pub fn scales(&self) -> Option<ScaleSet> {
        self.base_scales()
            .map(|base| ScaleSet::from_base(base, self.model.transform))
    }

    /// Data → base-pixel matrix for GPU-side renderers.
    #[must_use]
    pub fn window_matrix(&self) -> Option<WindowMatrix> {
        self.base_scales().map(BaseScales::window_matrix)
    }

    /// Data-space rectangle currently visible through the viewport.
    #[must_use]
    pub fn current_data_bounds(&self) -> Option<DataBounds> {
        let scales = self.scales()?;
        let viewport = self.model.viewport;
        Some(DataBounds {
            x: (
                scales.rescaled_x.invert(0.0),
                scales.rescaled_x.invert(viewport.width_px()),
            ),
            y: (
                scales.rescaled_y.invert(0.0),
                scales.rescaled_y.invert(viewport.height_px()),
            ),
        })
    }

    /// Projects a data point into live pixel space.
    #[must_use]
    pub fn data_to_pixel(&self, point: DataPoint) -> Option<DataPoint> {
        let scales = self.scales()?;
        Some(DataPoint::new(
            scales.rescaled_x.map(point.x),
            scales.rescaled_y.map(point.y),
        ))
    }

    #[must_use]
    pub fn pixel_to_data(&self, pixel: DataPoint) -> Option<DataPoint> {
        let scales = self.scales()?;
        Some(DataPoint::new(
            scales.rescaled_x.invert(pixel.x),
            scales.rescaled_y.invert(pixel.y),
        ))
    }

    pub(super) fn view_frame(&self, forced: bool) -> ViewFrame {
        let scales = self.scales();
        ViewFrame {
            viewport: self.model.viewport,
            transform: self.model.transform,
            window_matrix: scales.as_ref().map(ScaleSet::window_matrix),
            scales,
            mode: self.runtime.animation.mode(),
            forced,
        }
    }
}
