use crate::shared::error::StageError;
use crate::shared::frame::Frame;
use crate::stages::domain::frame_stage::FrameStage;

/// Watermark-removal slot in the pipeline.
///
/// Currently a pass-through: it returns an unmodified copy of the frame.
/// It exists as a distinct stage so a detector + inpainter can replace it
/// without changing the read/transform/write loop around it.
pub struct WatermarkStage;

impl FrameStage for WatermarkStage {
    fn name(&self) -> &'static str {
        "watermark"
    }

    // TODO: detect the watermark region and inpaint it instead of copying.
    fn apply(&self, frame: &Frame) -> Result<Frame, StageError> {
        Ok(frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_pixel_identical() {
        let frame = Frame::solid(8, 6, [12, 200, 77], 3);
        let out = WatermarkStage.apply(&frame).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn test_does_not_alias_the_input() {
        let frame = Frame::solid(4, 4, [50, 50, 50], 0);
        let mut out = WatermarkStage.apply(&frame).unwrap();
        out.data_mut()[0] = 255;
        assert_eq!(frame.data()[0], 50);
    }

    #[test]
    fn test_preserves_index_and_dimensions() {
        let frame = Frame::solid(10, 5, [0, 0, 0], 42);
        let out = WatermarkStage.apply(&frame).unwrap();
        assert_eq!(out.width(), 10);
        assert_eq!(out.height(), 5);
        assert_eq!(out.index(), 42);
    }
}
