use crate::error::{ViewError, ViewResult};
use crate::render::{ViewFrame, ViewportBinding, ViewportRenderer};

/// No-op renderer used by tests and headless controller usage.
///
/// It still rejects frames carrying non-finite scales so tests catch broken
/// geometry before it reaches a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub binding: Option<ViewportBinding>,
    pub initialized: bool,
    pub render_count: usize,
    pub forced_render_count: usize,
    pub last_frame: Option<ViewFrame>,
}

impl ViewportRenderer for NullRenderer {
    fn bind_viewport(&mut self, binding: ViewportBinding) {
        self.binding = Some(binding);
    }

    fn initialize_viewport(&mut self, _frame: &ViewFrame) {
        self.initialized = true;
    }

    fn render(&mut self, frame: &ViewFrame) -> ViewResult<()> {
        if let Some(scales) = frame.scales {
            let values = [
                scales.rescaled_x.domain().0,
                scales.rescaled_x.domain().1,
                scales.rescaled_y.domain().0,
                scales.rescaled_y.domain().1,
            ];
            if values.iter().any(|value| !value.is_finite()) {
                return Err(ViewError::InvalidData(
                    "frame scales must be finite".to_owned(),
                ));
            }
        }
        self.render_count += 1;
        if frame.forced {
            self.forced_render_count += 1;
        }
        self.last_frame = Some(*frame);
        Ok(())
    }
}
