use std::path::Path;

use crate::shared::error::{EncodeError, OpenError};
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Encodes frames into an output container.
///
/// The sink is opened with the source's metadata, so output rate and
/// dimensions always match the input; frames with any other shape are
/// rejected at `write`.
pub trait VideoWriter: Send {
    /// Creates the output container. Fails when the location cannot be
    /// created or the encoding is unsupported.
    fn open(&mut self, path: &Path, metadata: &VideoMetadata) -> Result<(), OpenError>;

    /// Appends one frame. Every written frame lands in the container in
    /// call order.
    fn write(&mut self, frame: &Frame) -> Result<(), EncodeError>;

    /// Flushes the encoder and finalizes the container. Idempotent: later
    /// calls are no-ops, so teardown paths may close unconditionally.
    fn close(&mut self) -> Result<(), EncodeError>;
}
