use std::path::Path;

use crate::shared::error::OpenError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Reads frames from a video source in decode order.
///
/// Implementations own the codec details; the pipeline only ever sees
/// [`Frame`] and [`VideoMetadata`]. The frame sequence is lazy, finite,
/// forward-only and not restartable; no frame is skipped or reordered.
pub trait VideoReader: Send {
    /// Opens a container and reports its native properties. Fails when the
    /// path is unreadable or not a decodable video.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, OpenError>;

    /// Iterator over the remaining frames. Mid-stream decode failures
    /// surface as items, not panics.
    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, OpenError>> + '_>;

    /// Releases decoder resources. Idempotent.
    fn close(&mut self);
}
