use crate::core::{AffineTransform2D, BaseScales, DataBounds, Viewport};

use super::ScaleExtent;

/// Transform centering the viewport on data point `(x, y)` at `scale_factor`.
///
/// The factor is clamped into `scale_extent`. Returns `None` when any input
/// is not finite.
pub(super) fn resolve_point_zoom_target(
    viewport: Viewport,
    base: BaseScales,
    scale_extent: ScaleExtent,
    scale_factor: f64,
    x: f64,
    y: f64,
) -> Option<AffineTransform2D> {
    if !scale_factor.is_finite() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    let k = scale_extent.clamp(scale_factor);
    centered_target(viewport, k, base.x.map(x), base.y.map(y))
}

/// Transform fitting `corners` into `fill_ratio` of the viewport.
///
/// The binding axis is whichever needs the smaller scale. A box with zero
/// span on both axes keeps `current_scale` and only pans to its center.
pub(super) fn resolve_bbox_zoom_target(
    viewport: Viewport,
    base: BaseScales,
    scale_extent: ScaleExtent,
    fill_ratio: f64,
    current_scale: f64,
    corners: DataBounds,
) -> Option<AffineTransform2D> {
    let x0 = base.x.map(corners.x.0);
    let x1 = base.x.map(corners.x.1);
    let y0 = base.y.map(corners.y.0);
    let y1 = base.y.map(corners.y.1);
    if ![x0, x1, y0, y1].iter().all(|value| value.is_finite()) {
        return None;
    }

    let span_x = (x1 - x0).abs();
    let span_y = (y1 - y0).abs();
    let k = if span_x == 0.0 && span_y == 0.0 {
        current_scale
    } else {
        let binding = (span_x / viewport.width_px()).max(span_y / viewport.height_px());
        fill_ratio / binding
    };
    if !k.is_finite() {
        return None;
    }

    centered_target(
        viewport,
        scale_extent.clamp(k),
        (x0 + x1) / 2.0,
        (y0 + y1) / 2.0,
    )
}

fn centered_target(
    viewport: Viewport,
    k: f64,
    center_x_px: f64,
    center_y_px: f64,
) -> Option<AffineTransform2D> {
    let center = viewport.center();
    let target = AffineTransform2D::identity()
        .translate(center.x, center.y)
        .scale(k)
        .translate(-center_x_px, -center_y_px);
    target.is_invertible().then_some(target)
}
