use crate::shared::error::StageError;
use crate::shared::frame::Frame;

/// A pure per-frame transform.
///
/// Stages take the input by reference and hand back a new frame, so the
/// caller's buffer is never aliased and implementations can be swapped
/// without touching the surrounding loop. Output dimensions must equal
/// input dimensions; the driver rejects anything else.
pub trait FrameStage: Send {
    /// Short stable name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Transforms one frame. A failure here aborts the whole run.
    fn apply(&self, frame: &Frame) -> Result<Frame, StageError>;
}
