use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// Monotonic linear map between a data domain and a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ViewResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(ViewError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ViewError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn domain_span(self) -> f64 {
        self.domain_end - self.domain_start
    }

    #[must_use]
    pub fn range_span(self) -> f64 {
        self.range_end - self.range_start
    }

    /// Pixels covered by one data unit (signed by orientation).
    #[must_use]
    pub fn pixels_per_unit(self) -> f64 {
        self.range_span() / self.domain_span()
    }

    /// Maps a data value to a pixel value.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_span();
        if span == 0.0 {
            return (self.range_start + self.range_end) / 2.0;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * self.range_span()
    }

    /// Maps a pixel value back to a data value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_span();
        if span == 0.0 {
            return (self.domain_start + self.domain_end) / 2.0;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * self.domain_span()
    }

    #[must_use]
    pub(crate) fn with_domain(self, domain_start: f64, domain_end: f64) -> Self {
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }
}
