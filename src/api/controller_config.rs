use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ViewError, ViewResult};

use super::LabelFormat;

/// Allowed range for the zoom scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self {
            min: 1.0 / 3.0,
            max: 100_000.0,
        }
    }
}

impl ScaleExtent {
    #[must_use]
    pub fn clamp(self, scale_factor: f64) -> f64 {
        scale_factor.clamp(self.min, self.max)
    }
}

/// Public controller bootstrap configuration.
///
/// This type is serializable so host applications can persist/load viewport
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportControllerConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub scale_extent: ScaleExtent,
    /// How long the render loop keeps ticking after a gesture.
    #[serde(default = "default_gesture_idle_ms")]
    pub gesture_idle_ms: f64,
    /// Minimum spacing between resolved pointer moves (~30 Hz).
    #[serde(default = "default_pointer_debounce_ms")]
    pub pointer_debounce_ms: f64,
    #[serde(default = "default_annotation_offset")]
    pub annotation_offset: (f64, f64),
    /// Share of the viewport a bounding-box zoom fills on its binding axis.
    #[serde(default = "default_bbox_fill_ratio")]
    pub bbox_fill_ratio: f64,
    #[serde(default = "default_zoom_duration_ms")]
    pub default_zoom_duration_ms: f64,
    #[serde(default = "default_zoom_duration_ms")]
    pub default_bbox_duration_ms: f64,
    /// Registered renderer that answers pointer picks.
    #[serde(default = "default_pick_renderer_key")]
    pub pick_renderer_key: String,
    /// Explicit label fields; `None` lists every non-internal field.
    #[serde(default)]
    pub label_fields: Option<Vec<String>>,
    #[serde(default)]
    pub label_format: LabelFormat,
}

impl ViewportControllerConfig {
    /// Creates a config with default zoom limits and timings.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scale_extent: ScaleExtent::default(),
            gesture_idle_ms: default_gesture_idle_ms(),
            pointer_debounce_ms: default_pointer_debounce_ms(),
            annotation_offset: default_annotation_offset(),
            bbox_fill_ratio: default_bbox_fill_ratio(),
            default_zoom_duration_ms: default_zoom_duration_ms(),
            default_bbox_duration_ms: default_zoom_duration_ms(),
            pick_renderer_key: default_pick_renderer_key(),
            label_fields: None,
            label_format: LabelFormat::default(),
        }
    }

    #[must_use]
    pub fn with_scale_extent(mut self, min: f64, max: f64) -> Self {
        self.scale_extent = ScaleExtent { min, max };
        self
    }

    #[must_use]
    pub fn with_gesture_idle_ms(mut self, idle_ms: f64) -> Self {
        self.gesture_idle_ms = idle_ms;
        self
    }

    #[must_use]
    pub fn with_pointer_debounce_ms(mut self, debounce_ms: f64) -> Self {
        self.pointer_debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_annotation_offset(mut self, dx: f64, dy: f64) -> Self {
        self.annotation_offset = (dx, dy);
        self
    }

    #[must_use]
    pub fn with_bbox_fill_ratio(mut self, ratio: f64) -> Self {
        self.bbox_fill_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_pick_renderer_key(mut self, key: impl Into<String>) -> Self {
        self.pick_renderer_key = key.into();
        self
    }

    #[must_use]
    pub fn with_label_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_label_format(mut self, format: LabelFormat) -> Self {
        self.label_format = format;
        self
    }

    pub fn validate(&self) -> ViewResult<()> {
        self.viewport.ensure_valid()?;

        let ScaleExtent { min, max } = self.scale_extent;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ViewError::InvalidData(
                "scale extent must be finite with 0 < min <= max".to_owned(),
            ));
        }
        for (name, value) in [
            ("gesture idle duration", self.gesture_idle_ms),
            ("pointer debounce", self.pointer_debounce_ms),
            ("default zoom duration", self.default_zoom_duration_ms),
            ("default bbox duration", self.default_bbox_duration_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ViewError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.annotation_offset.0.is_finite() || !self.annotation_offset.1.is_finite() {
            return Err(ViewError::InvalidData(
                "annotation offset must be finite".to_owned(),
            ));
        }
        if !self.bbox_fill_ratio.is_finite()
            || self.bbox_fill_ratio <= 0.0
            || self.bbox_fill_ratio > 1.0
        {
            return Err(ViewError::InvalidData(
                "bbox fill ratio must be in (0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ViewResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ViewError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ViewResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ViewError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_gesture_idle_ms() -> f64 {
    10_000.0
}

fn default_pointer_debounce_ms() -> f64 {
    1_000.0 / 30.0
}

fn default_annotation_offset() -> (f64, f64) {
    (0.0, 30.0)
}

fn default_bbox_fill_ratio() -> f64 {
    0.9
}

fn default_zoom_duration_ms() -> f64 {
    4_000.0
}

fn default_pick_renderer_key() -> String {
    "points".to_owned()
}
