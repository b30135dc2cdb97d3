use serde::{Deserialize, Serialize};

use crate::core::{AffineTransform2D, Clock, DataBounds, Viewport};
use crate::error::{ViewError, ViewResult};
use crate::interaction::{AnnotationPoint, ViewportMode, ZoomTransition};

use super::ViewportController;

pub const VIEW_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view state used by regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub viewport: Viewport,
    pub transform: AffineTransform2D,
    pub mode: ViewportMode,
    pub transition: Option<ZoomTransition>,
    pub data_bounds: Option<DataBounds>,
    pub timer_active: bool,
    pub timer_deadline_ms: Option<f64>,
    pub renderer_keys: Vec<String>,
    pub annotations: Vec<AnnotationPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ViewSnapshot,
}

impl ViewSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ViewResult<String> {
        let payload = ViewSnapshotJsonContractV1 {
            schema_version: VIEW_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ViewError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ViewResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ViewSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ViewSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ViewError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != VIEW_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ViewError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<C: Clock> ViewportController<C> {
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            viewport: self.model.viewport,
            transform: self.model.transform,
            mode: self.runtime.animation.mode(),
            transition: self.runtime.animation.transition(),
            data_bounds: self.current_data_bounds(),
            timer_active: self.runtime.timer.is_active(),
            timer_deadline_ms: self.runtime.timer.deadline_ms(),
            renderer_keys: self.renderer_keys(),
            annotations: self.runtime.annotations.to_vec(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ViewResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
