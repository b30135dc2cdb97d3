mod controller;
mod controller_config;
mod label_text_formatter;
mod pointer_controller;
mod renderer_registry;
mod scale_access;
mod tick_controller;
mod view_snapshot;
mod view_state;
mod zoom_controller;
mod zoom_target_resolver;

pub use controller::ViewportController;
pub use controller_config::{ScaleExtent, ViewportControllerConfig};
pub use label_text_formatter::{LabelFormat, format_label_text, label_fields};
pub use view_snapshot::{VIEW_SNAPSHOT_JSON_SCHEMA_V1, ViewSnapshot, ViewSnapshotJsonContractV1};
