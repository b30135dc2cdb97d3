use serde::{Deserialize, Serialize};

use crate::core::{AffineTransform2D, Axis, AxisExtent, DataExtent, LinearScale, Viewport};
use crate::error::ViewResult;

/// Half-width of the unit domain used when an axis extent has zero span.
const DEGENERATE_AXIS_HALF_SPAN: f64 = 0.5;

/// Relative half-width for zero-span axes far from the origin, where
/// `value ± 0.5` rounds back to `value`.
const DEGENERATE_AXIS_RELATIVE_HALF_SPAN: f64 = 1e-9;

/// Aspect-corrected data → pixel scales that ignore the live zoom.
///
/// One data unit on x covers the same number of pixels as one data unit on
/// y. The axis with spare pixels is centered with symmetric padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub x_buffer_px: f64,
    pub y_buffer_px: f64,
}

impl BaseScales {
    /// Derives equal-unit scales for `extent` rendered into `viewport`.
    ///
    /// A zero-span axis falls back to a unit domain centered on its value
    /// (widened in proportion to the value at large magnitudes), so a single
    /// point or a flat line still yields finite scales.
    pub fn derive(extent: DataExtent, viewport: Viewport) -> ViewResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let width = viewport.width_px();
        let height = viewport.height_px();

        let x_domain = effective_domain(extent.axis(Axis::X));
        let y_domain = effective_domain(extent.axis(Axis::Y));

        let x_pixels_per_unit = width / (x_domain.1 - x_domain.0);
        let y_pixels_per_unit = height / (y_domain.1 - y_domain.0);
        let data_aspect_ratio = x_pixels_per_unit / y_pixels_per_unit;

        let mut x_buffer_px = 0.0;
        let mut y_buffer_px = 0.0;
        if data_aspect_ratio > 1.0 {
            // x has spare pixels per unit: shrink and center it.
            let x_target = width / data_aspect_ratio;
            x_buffer_px = (width - x_target) / 2.0;
        } else {
            let y_target = height * data_aspect_ratio;
            y_buffer_px = (height - y_target) / 2.0;
        }

        Ok(Self {
            x: LinearScale::new(x_domain, (x_buffer_px, width - x_buffer_px))?,
            y: LinearScale::new(y_domain, (y_buffer_px, height - y_buffer_px))?,
            x_buffer_px,
            y_buffer_px,
        })
    }

    /// Row-major matrix taking data coordinates to base pixel coordinates.
    #[must_use]
    pub fn window_matrix(self) -> WindowMatrix {
        WindowMatrix::from_scales(self.x, self.y)
    }
}

fn effective_domain(extent: AxisExtent) -> (f64, f64) {
    if extent.is_degenerate() {
        let center = extent.midpoint();
        let half_span =
            DEGENERATE_AXIS_HALF_SPAN.max(center.abs() * DEGENERATE_AXIS_RELATIVE_HALF_SPAN);
        (center - half_span, center + half_span)
    } else {
        (extent.min, extent.max)
    }
}

/// Base scales plus their rescaled variants under the live transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSet {
    pub base_x: LinearScale,
    pub base_y: LinearScale,
    pub rescaled_x: LinearScale,
    pub rescaled_y: LinearScale,
}

impl ScaleSet {
    #[must_use]
    pub fn from_base(base: BaseScales, transform: AffineTransform2D) -> Self {
        Self {
            base_x: base.x,
            base_y: base.y,
            rescaled_x: transform.rescale_x(base.x),
            rescaled_y: transform.rescale_y(base.y),
        }
    }

    #[must_use]
    pub fn window_matrix(&self) -> WindowMatrix {
        WindowMatrix::from_scales(self.base_x, self.base_y)
    }
}

/// 3×3 homogeneous matrix (row-major) consumed by GPU-side renderers.
///
/// It maps the domain midpoint to the range midpoint and the domain span to
/// the range span on each axis. Normalizing pixels into clip space is left to
/// the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowMatrix {
    pub rows: [[f64; 3]; 3],
}

impl WindowMatrix {
    #[must_use]
    pub fn from_scales(x: LinearScale, y: LinearScale) -> Self {
        let (x_multiplier, x_offset) = axis_terms(x);
        let (y_multiplier, y_offset) = axis_terms(y);
        Self {
            rows: [
                [x_multiplier, 0.0, x_offset],
                [0.0, y_multiplier, y_offset],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub fn flatten(self) -> [f64; 9] {
        let [a, b, c] = self.rows;
        [a[0], a[1], a[2], b[0], b[1], b[2], c[0], c[1], c[2]]
    }

    /// Applies the matrix to a data-space point.
    #[must_use]
    pub fn project(self, x: f64, y: f64) -> (f64, f64) {
        let [row_x, row_y, _] = self.rows;
        (
            row_x[0] * x + row_x[1] * y + row_x[2],
            row_y[0] * x + row_y[1] * y + row_y[2],
        )
    }
}

fn axis_terms(scale: LinearScale) -> (f64, f64) {
    let (d0, d1) = scale.domain();
    let (r0, r1) = scale.range();
    let multiplier = scale.range_span() / scale.domain_span();
    let domain_mid = (d0 + d1) / 2.0;
    let range_mid = (r0 + r1) / 2.0;
    (multiplier, -multiplier * domain_mid + range_mid)
}
