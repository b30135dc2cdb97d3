use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// Pixel surface size owned by a viewport controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }

    #[must_use]
    pub fn center(self) -> DataPoint {
        DataPoint::new(self.width_px() / 2.0, self.height_px() / 2.0)
    }

    pub(crate) fn ensure_valid(self) -> ViewResult<Self> {
        if !self.is_valid() {
            return Err(ViewError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Closed `[min, max]` data range covered by a dataset on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub min: f64,
    pub max: f64,
}

impl AxisExtent {
    pub fn new(min: f64, max: f64) -> ViewResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ViewError::InvalidData(
                "extent bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ViewError::InvalidData(format!(
                "extent min must be <= max (min={min}, max={max})"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.span() == 0.0
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Per-axis data extent reported by a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataExtent {
    pub x: AxisExtent,
    pub y: AxisExtent,
}

impl DataExtent {
    #[must_use]
    pub fn new(x: AxisExtent, y: AxisExtent) -> Self {
        Self { x, y }
    }

    /// Builds an extent from raw `(min, max)` pairs, validating both axes.
    pub fn from_ranges(x: (f64, f64), y: (f64, f64)) -> ViewResult<Self> {
        Ok(Self {
            x: AxisExtent::new(x.0, x.1)?,
            y: AxisExtent::new(y.0, y.1)?,
        })
    }

    #[must_use]
    pub fn axis(self, axis: Axis) -> AxisExtent {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Data-space rectangle currently visible through the viewport.
///
/// Each pair holds the data value at the leading pixel edge (`0`) and the
/// trailing edge (`width` or `height`), so it keeps the scale orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl DataBounds {
    #[must_use]
    pub fn center(self) -> DataPoint {
        DataPoint::new((self.x.0 + self.x.1) / 2.0, (self.y.0 + self.y.1) / 2.0)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.x.1 - self.x.0).abs()
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.y.1 - self.y.0).abs()
    }
}
