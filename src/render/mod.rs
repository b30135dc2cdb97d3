mod frame;
mod null_renderer;
mod point_cloud_renderer;

pub use frame::{ViewFrame, ViewportBinding};
pub use null_renderer::NullRenderer;
pub use point_cloud_renderer::PointCloudRenderer;

use crate::core::{Axis, DataRecord};
use crate::error::ViewResult;

/// Contract implemented by any point-rendering backend driven by a
/// [`ViewportController`](crate::api::ViewportController).
///
/// The controller never draws. It hands each backend a read-only
/// [`ViewFrame`] per tick and asks it to resolve pixels to records.
pub trait ViewportRenderer {
    /// Called once at registration, before `initialize_viewport`.
    fn bind_viewport(&mut self, _binding: ViewportBinding) {}

    /// One-time setup with the view as it is at registration.
    fn initialize_viewport(&mut self, _frame: &ViewFrame) {}

    fn render(&mut self, frame: &ViewFrame) -> ViewResult<()>;

    /// Nearest data record under the pixel, if any.
    fn pick_nearest(&self, _pixel_x: f64, _pixel_y: f64) -> Option<DataRecord> {
        None
    }

    /// Data-space value of `record` on `axis`.
    fn field_value(&self, _axis: Axis, _record: &DataRecord) -> Option<f64> {
        None
    }

    fn on_point_click(&mut self, _record: &DataRecord) {}
}
