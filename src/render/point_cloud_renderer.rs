use ordered_float::OrderedFloat;
#[cfg(feature = "parallel-pick")]
use rayon::prelude::*;

use crate::core::{Axis, DataPoint, DataRecord};
use crate::error::ViewResult;
use crate::render::{ViewFrame, ViewportRenderer};

const DEFAULT_PICK_RADIUS_PX: f64 = 8.0;

/// In-memory reference renderer.
///
/// Holds plain records, projects them with the scales of the last frame it
/// saw and answers nearest-point picks by brute force. Headless hosts use it
/// to drive hover labels without a GPU backend.
#[derive(Debug, Clone)]
pub struct PointCloudRenderer {
    records: Vec<DataRecord>,
    x_field: String,
    y_field: String,
    pick_radius_px: f64,
    last_frame: Option<ViewFrame>,
    render_count: usize,
    clicked: Vec<DataRecord>,
}

impl PointCloudRenderer {
    #[must_use]
    pub fn new(records: Vec<DataRecord>) -> Self {
        Self {
            records,
            x_field: "x".to_owned(),
            y_field: "y".to_owned(),
            pick_radius_px: DEFAULT_PICK_RADIUS_PX,
            last_frame: None,
            render_count: 0,
            clicked: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        self.x_field = x_field.into();
        self.y_field = y_field.into();
        self
    }

    #[must_use]
    pub fn with_pick_radius(mut self, pick_radius_px: f64) -> Self {
        self.pick_radius_px = pick_radius_px;
        self
    }

    #[must_use]
    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    #[must_use]
    pub fn clicked(&self) -> &[DataRecord] {
        &self.clicked
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&ViewFrame> {
        self.last_frame.as_ref()
    }

    fn field_name(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x_field,
            Axis::Y => &self.y_field,
        }
    }

    fn pixel_distance_sq(
        &self,
        frame: &ViewFrame,
        record: &DataRecord,
        pointer: DataPoint,
    ) -> Option<OrderedFloat<f64>> {
        let x = self.field_value(Axis::X, record)?;
        let y = self.field_value(Axis::Y, record)?;
        let px = frame.data_to_pixel(DataPoint::new(x, y))?;
        let dx = px.x - pointer.x;
        let dy = px.y - pointer.y;
        let dist_sq = dx * dx + dy * dy;
        dist_sq.is_finite().then_some(OrderedFloat(dist_sq))
    }

    #[cfg(not(feature = "parallel-pick"))]
    fn nearest_index(
        &self,
        frame: &ViewFrame,
        pointer: DataPoint,
    ) -> Option<(OrderedFloat<f64>, usize)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.pixel_distance_sq(frame, record, pointer)
                    .map(|dist| (dist, index))
            })
            .min_by_key(|item| item.0)
    }

    #[cfg(feature = "parallel-pick")]
    fn nearest_index(
        &self,
        frame: &ViewFrame,
        pointer: DataPoint,
    ) -> Option<(OrderedFloat<f64>, usize)> {
        self.records
            .par_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.pixel_distance_sq(frame, record, pointer)
                    .map(|dist| (dist, index))
            })
            .min_by_key(|item| *item)
    }
}

impl ViewportRenderer for PointCloudRenderer {
    fn initialize_viewport(&mut self, frame: &ViewFrame) {
        self.last_frame = Some(*frame);
    }

    fn render(&mut self, frame: &ViewFrame) -> ViewResult<()> {
        self.last_frame = Some(*frame);
        self.render_count += 1;
        Ok(())
    }

    fn pick_nearest(&self, pixel_x: f64, pixel_y: f64) -> Option<DataRecord> {
        let frame = self.last_frame.as_ref()?;
        let (dist_sq, index) = self.nearest_index(frame, DataPoint::new(pixel_x, pixel_y))?;
        if dist_sq.0 > self.pick_radius_px * self.pick_radius_px {
            return None;
        }
        self.records.get(index).cloned()
    }

    fn field_value(&self, axis: Axis, record: &DataRecord) -> Option<f64> {
        record.number(self.field_name(axis))
    }

    fn on_point_click(&mut self, record: &DataRecord) {
        self.clicked.push(record.clone());
    }
}
