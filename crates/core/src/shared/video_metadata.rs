use std::path::PathBuf;

use crate::shared::frame::Frame;

/// Native properties of a stream, captured once when the container is
/// opened and immutable afterwards. The sink is opened with the same
/// values so output rate and dimensions always match the source.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Frame count as reported by the container; 0 when unknown.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Whether a frame has the dimensions this stream was declared with.
    pub fn matches(&self, frame: &Frame) -> bool {
        frame.width() == self.width && frame.height() == self.height
    }

    /// Frame rate rounded for encoders that take integer rates. Sources
    /// that report a degenerate rate fall back to 30 fps.
    pub fn integer_fps(&self) -> i32 {
        let fps = self.fps.round() as i32;
        if fps <= 0 {
            30
        } else {
            fps
        }
    }
}
