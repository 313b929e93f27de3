use crate::shared::constants::{
    DENOISE_COLOR_STRENGTH, DENOISE_LUMA_STRENGTH, DENOISE_SEARCH_WINDOW, DENOISE_TEMPLATE_WINDOW,
};
use crate::shared::error::StageError;
use crate::shared::frame::Frame;
use crate::stages::domain::frame_stage::FrameStage;

use super::{check_buffer, lab, nlmeans};

/// Color-aware non-local-means denoiser.
///
/// Works in Lab so luminance noise and chroma noise get their own filter
/// strengths; smoothing the planes separately does not shift color
/// balance.
pub struct DenoiseStage {
    luma_strength: f32,
    color_strength: f32,
    template_window: usize,
    search_window: usize,
}

impl DenoiseStage {
    pub fn new(
        luma_strength: f32,
        color_strength: f32,
        template_window: usize,
        search_window: usize,
    ) -> Self {
        Self {
            luma_strength,
            color_strength,
            template_window,
            search_window,
        }
    }
}

impl Default for DenoiseStage {
    fn default() -> Self {
        Self::new(
            DENOISE_LUMA_STRENGTH,
            DENOISE_COLOR_STRENGTH,
            DENOISE_TEMPLATE_WINDOW,
            DENOISE_SEARCH_WINDOW,
        )
    }
}

impl FrameStage for DenoiseStage {
    fn name(&self) -> &'static str {
        "denoise"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame, StageError> {
        check_buffer(self.name(), frame)?;
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        let (l, a, b) = lab::split_lab_planes(frame.data());
        let l = nlmeans::denoise_plane(
            &l,
            width,
            height,
            self.luma_strength,
            self.template_window,
            self.search_window,
        );
        let a = nlmeans::denoise_plane(
            &a,
            width,
            height,
            self.color_strength,
            self.template_window,
            self.search_window,
        );
        let b = nlmeans::denoise_plane(
            &b,
            width,
            height,
            self.color_strength,
            self.template_window,
            self.search_window,
        );

        Ok(Frame::new(
            lab::merge_lab_planes(&l, &a, &b),
            frame.width(),
            frame.height(),
            frame.index(),
        ))
    }
}
