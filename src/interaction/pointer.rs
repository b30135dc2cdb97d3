use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, DataRecord};

/// Hover annotation built from one accepted pointer-move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPoint {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub record: DataRecord,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Pixel position of the picked point itself under the live view.
    pub anchor: Option<DataPoint>,
}

impl AnnotationPoint {
    /// Where the label box should be placed.
    #[must_use]
    pub fn label_position(&self) -> DataPoint {
        DataPoint::new(self.pixel_x + self.offset_x, self.pixel_y + self.offset_y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerResolution {
    /// Arrived inside the debounce window; nothing was queried.
    Dropped,
    Annotated(AnnotationPoint),
    /// Queried, but no point was under the pointer.
    Cleared,
}

/// Rate-limited pointer → nearest-point resolution.
///
/// Events arriving less than `debounce_ms` after the last accepted event are
/// dropped outright. They are not queued and not coalesced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerResolver {
    debounce_ms: f64,
    offset: (f64, f64),
    last_fired_ms: Option<f64>,
}

impl PointerResolver {
    #[must_use]
    pub fn new(debounce_ms: f64, offset: (f64, f64)) -> Self {
        Self {
            debounce_ms,
            offset,
            last_fired_ms: None,
        }
    }

    #[must_use]
    pub fn debounce_ms(&self) -> f64 {
        self.debounce_ms
    }

    #[must_use]
    pub fn last_fired_ms(&self) -> Option<f64> {
        self.last_fired_ms
    }

    /// Registers an event at `now_ms`; returns whether it passes the debounce.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_fired_ms {
            let elapsed = now_ms - last;
            // A clock that went backwards restarts the window.
            if elapsed >= 0.0 && elapsed < self.debounce_ms {
                return false;
            }
        }
        self.last_fired_ms = Some(now_ms);
        true
    }

    pub fn resolve<F>(
        &mut self,
        now_ms: f64,
        pixel_x: f64,
        pixel_y: f64,
        pick: F,
    ) -> PointerResolution
    where
        F: FnOnce(f64, f64) -> Option<DataRecord>,
    {
        if !self.accept(now_ms) {
            return PointerResolution::Dropped;
        }
        match pick(pixel_x, pixel_y) {
            Some(record) => PointerResolution::Annotated(AnnotationPoint {
                pixel_x,
                pixel_y,
                record,
                offset_x: self.offset.0,
                offset_y: self.offset.1,
                anchor: None,
            }),
            None => PointerResolution::Cleared,
        }
    }

    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}
