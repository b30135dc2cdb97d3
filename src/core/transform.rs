use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale};
use crate::error::{ViewError, ViewResult};

/// Uniform pan/zoom transform: `p' = p * k + (x, y)`.
///
/// Composition uses right-multiply semantics, so the rightmost transform in a
/// chain is the one applied closest to the data:
/// `a.compose(b).apply(p) == a.apply(b.apply(p))`. `translate` and `scale`
/// follow the same convention, which makes
/// `identity().translate(w / 2, h / 2).scale(k).translate(-cx, -cy)` read in
/// the order the operations are applied to the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform2D {
    k: f64,
    x: f64,
    y: f64,
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform2D {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Creates a transform with scale factor `k` and translation `(x, y)`.
    ///
    /// `k` must be finite and strictly positive so the transform is always
    /// invertible.
    pub fn new(k: f64, x: f64, y: f64) -> ViewResult<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(ViewError::InvalidData(
                "transform scale factor must be finite and > 0".to_owned(),
            ));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(ViewError::InvalidData(
                "transform translation must be finite".to_owned(),
            ));
        }
        Ok(Self { k, x, y })
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub fn scale_factor(self) -> f64 {
        self.k
    }

    #[must_use]
    pub fn translate_x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn translate_y(self) -> f64 {
        self.y
    }

    /// Returns `self ∘ translation(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + self.k * dx,
            y: self.y + self.k * dy,
        }
    }

    /// Returns `self ∘ scaling(factor)`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            k: self.k * factor,
            x: self.x,
            y: self.y,
        }
    }

    /// Returns `self ∘ other`.
    #[must_use]
    pub fn compose(self, other: Self) -> Self {
        Self {
            k: self.k * other.k,
            x: self.k * other.x + self.x,
            y: self.k * other.y + self.y,
        }
    }

    /// Same translation with the scale factor clamped into `[min, max]`.
    #[must_use]
    pub fn with_scale_clamped(self, min: f64, max: f64) -> Self {
        Self {
            k: self.k.clamp(min, max),
            x: self.x,
            y: self.y,
        }
    }

    #[must_use]
    pub fn is_invertible(self) -> bool {
        self.k != 0.0 && self.k.is_finite() && self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn apply(self, point: DataPoint) -> DataPoint {
        DataPoint::new(self.apply_x(point.x), self.apply_y(point.y))
    }

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.k + self.x
    }

    #[must_use]
    pub fn apply_y(self, y: f64) -> f64 {
        y * self.k + self.y
    }

    /// Maps a transformed point back to its untransformed position.
    ///
    /// Returns `None` for a degenerate transform (`k == 0` or non-finite
    /// components) instead of producing NaN coordinates.
    #[must_use]
    pub fn invert(self, point: DataPoint) -> Option<DataPoint> {
        if !self.is_invertible() {
            return None;
        }
        Some(DataPoint::new(self.invert_x(point.x), self.invert_y(point.y)))
    }

    /// Unchecked axis inversion; callers go through validated transforms.
    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    #[must_use]
    pub fn invert_y(self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Scale whose domain is `scale`'s domain seen through this transform.
    ///
    /// The range is kept; the domain becomes the data values that land on the
    /// range ends once the transform is applied.
    #[must_use]
    pub fn rescale_x(self, scale: LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        scale.with_domain(
            scale.invert(self.invert_x(r0)),
            scale.invert(self.invert_x(r1)),
        )
    }

    #[must_use]
    pub fn rescale_y(self, scale: LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        scale.with_domain(
            scale.invert(self.invert_y(r0)),
            scale.invert(self.invert_y(r1)),
        )
    }
}
