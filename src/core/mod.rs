pub mod clock;
pub mod dataset;
pub mod record;
pub mod scale;
pub mod scale_set;
pub mod transform;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dataset::ExtentSource;
pub use record::DataRecord;
pub use scale::LinearScale;
pub use scale_set::{BaseScales, ScaleSet, WindowMatrix};
pub use transform::AffineTransform2D;
pub use types::{Axis, AxisExtent, DataBounds, DataExtent, DataPoint, Viewport};
