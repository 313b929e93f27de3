use crate::shared::constants::{CONTRAST_CLIP_LIMIT, CONTRAST_TILE_GRID};
use crate::shared::error::StageError;
use crate::shared::frame::Frame;
use crate::stages::domain::frame_stage::FrameStage;

use super::{check_buffer, clahe, lab};

/// Local contrast equalization on the lightness plane only.
///
/// The frame is split into Lab planes, the L plane goes through
/// clip-limited adaptive histogram equalization, and the a/b planes are
/// recombined untouched, so chroma passes through this stage unmodified.
pub struct ContrastStage {
    clip_limit: f32,
    tile_grid: usize,
}

impl ContrastStage {
    pub fn new(clip_limit: f32, tile_grid: usize) -> Self {
        Self {
            clip_limit,
            tile_grid,
        }
    }
}

impl Default for ContrastStage {
    fn default() -> Self {
        Self::new(CONTRAST_CLIP_LIMIT, CONTRAST_TILE_GRID)
    }
}

impl FrameStage for ContrastStage {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame, StageError> {
        check_buffer(self.name(), frame)?;
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        let (l, a, b) = lab::split_lab_planes(frame.data());

        // Histogram equalization wants 8-bit values; only L is quantized.
        let l_bytes: Vec<u8> = l.iter().map(|&v| v.round().clamp(0.0, 255.0) as u8).collect();
        let equalized = clahe::equalize_plane(&l_bytes, width, height, self.clip_limit, self.tile_grid);
        let l: Vec<f32> = equalized.iter().map(|&v| v as f32).collect();

        Ok(Frame::new(
            lab::merge_lab_planes(&l, &a, &b),
            frame.width(),
            frame.height(),
            frame.index(),
        ))
    }
}
