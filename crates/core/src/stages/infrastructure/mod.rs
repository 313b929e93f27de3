pub mod clahe;
pub mod contrast_stage;
pub mod convolve;
pub mod denoise_stage;
pub mod lab;
pub mod nlmeans;
pub mod sharpen_stage;
pub mod watermark_stage;

use crate::shared::error::StageError;
use crate::shared::frame::{Frame, CHANNELS};
use crate::stages::domain::frame_stage::FrameStage;

use contrast_stage::ContrastStage;
use denoise_stage::DenoiseStage;
use sharpen_stage::SharpenStage;
use watermark_stage::WatermarkStage;

/// Stage list for the watermark-removal pipeline.
pub fn watermark_chain() -> Vec<Box<dyn FrameStage>> {
    vec![Box::new(WatermarkStage)]
}

/// Stage list for the quality-enhancement pipeline, in its fixed order:
/// denoise, then local contrast equalization, then sharpen.
pub fn enhancement_chain() -> Vec<Box<dyn FrameStage>> {
    vec![
        Box::new(DenoiseStage::default()),
        Box::new(ContrastStage::default()),
        Box::new(SharpenStage::default()),
    ]
}

/// Rejects frames whose buffer does not match their declared dimensions.
pub(crate) fn check_buffer(stage: &'static str, frame: &Frame) -> Result<(), StageError> {
    let expected = frame.width() as usize * frame.height() as usize * CHANNELS;
    if frame.data().len() != expected {
        return Err(StageError::new(
            stage,
            frame.index(),
            format!(
                "frame buffer holds {} bytes, dimensions imply {expected}",
                frame.data().len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watermark_chain_is_a_single_stage() {
        let chain = watermark_chain();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].name(), "watermark");
    }

    #[test]
    fn test_enhancement_chain_order() {
        let names: Vec<_> = enhancement_chain().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["denoise", "contrast", "sharpen"]);
    }

    #[test]
    fn test_enhancement_chain_changes_pixels() {
        // A gradient frame so every stage has something to chew on.
        let mut data = Vec::new();
        for y in 0..24u32 {
            for x in 0..32u32 {
                data.push((x * 8) as u8);
                data.push((y * 10) as u8);
                data.push(128);
            }
        }
        let frame = Frame::new(data, 32, 24, 0);

        let mut current = frame.clone();
        for stage in enhancement_chain() {
            current = stage.apply(&current).unwrap();
        }
        assert_eq!(current.width(), frame.width());
        assert_eq!(current.height(), frame.height());
        assert_ne!(current.data(), frame.data());
    }

    #[test]
    fn test_chain_application_is_deterministic() {
        let frame = Frame::solid(16, 16, [77, 150, 33], 0);
        let run = |frame: &Frame| {
            let mut current = frame.clone();
            for stage in enhancement_chain() {
                current = stage.apply(&current).unwrap();
            }
            current
        };
        assert_eq!(run(&frame), run(&frame));
    }
}
