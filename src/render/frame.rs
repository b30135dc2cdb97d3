use serde::{Deserialize, Serialize};

use crate::core::{AffineTransform2D, DataPoint, ScaleSet, Viewport, WindowMatrix};
use crate::interaction::ViewportMode;

/// Read-only view state handed to renderers on every tick.
///
/// `scales` and `window_matrix` are `None` while no dataset extent is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub viewport: Viewport,
    pub transform: AffineTransform2D,
    pub scales: Option<ScaleSet>,
    pub window_matrix: Option<WindowMatrix>,
    pub mode: ViewportMode,
    /// Set for redraws requested outside the idle loop.
    pub forced: bool,
}

impl ViewFrame {
    /// Projects a data point into live pixel space.
    #[must_use]
    pub fn data_to_pixel(&self, point: DataPoint) -> Option<DataPoint> {
        let scales = self.scales?;
        Some(DataPoint::new(
            scales.rescaled_x.map(point.x),
            scales.rescaled_y.map(point.y),
        ))
    }

    /// Projects a live pixel position back into data space.
    #[must_use]
    pub fn pixel_to_data(&self, pixel: DataPoint) -> Option<DataPoint> {
        let scales = self.scales?;
        Some(DataPoint::new(
            scales.rescaled_x.invert(pixel.x),
            scales.rescaled_y.invert(pixel.y),
        ))
    }
}

/// Passed to a renderer once, when it is registered with a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportBinding {
    pub key: String,
    pub viewport: Viewport,
}
