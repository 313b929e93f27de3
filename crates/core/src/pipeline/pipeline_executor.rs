use std::path::Path;

use crate::shared::error::PipelineError;
use crate::shared::video_metadata::VideoMetadata;
use crate::stages::domain::frame_stage::FrameStage;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Observational knobs for one run.
///
/// The progress callback cannot cancel anything: a run proceeds to
/// completion or failure, and timeout policy belongs to the caller.
#[derive(Default)]
pub struct PipelineConfig {
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
}

/// What a finished run did. Reads and writes are equal on success: the
/// sink receives exactly the frames the source produced, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessingReport {
    pub frames_read: usize,
    pub frames_written: usize,
}

/// Port for driving the read → transform → write loop.
///
/// An application-layer interface in the hexagonal sense; infrastructure
/// provides the concrete execution strategy.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        stages: Vec<Box<dyn FrameStage>>,
        metadata: &VideoMetadata,
        output_path: &Path,
        config: PipelineConfig,
    ) -> Result<ProcessingReport, PipelineError>;
}
