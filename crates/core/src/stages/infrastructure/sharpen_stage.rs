use crate::shared::constants::SHARPEN_KERNEL;
use crate::shared::error::StageError;
use crate::shared::frame::{Frame, CHANNELS};
use crate::stages::domain::frame_stage::FrameStage;

use super::{check_buffer, convolve};

/// High-frequency boost with a fixed unity-gain 3×3 kernel, applied to
/// every channel independently. Borders replicate the edge pixel.
pub struct SharpenStage {
    kernel: [[f32; 3]; 3],
}

impl SharpenStage {
    pub fn new(kernel: [[f32; 3]; 3]) -> Self {
        Self { kernel }
    }
}

impl Default for SharpenStage {
    fn default() -> Self {
        Self::new(SHARPEN_KERNEL)
    }
}

impl FrameStage for SharpenStage {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame, StageError> {
        check_buffer(self.name(), frame)?;
        let data = convolve::convolve3x3(
            frame.data(),
            frame.width() as usize,
            frame.height() as usize,
            CHANNELS,
            &self.kernel,
        );
        Ok(Frame::new(data, frame.width(), frame.height(), frame.index()))
    }
}
