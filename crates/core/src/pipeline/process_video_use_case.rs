use std::path::Path;

use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, ProcessingReport};
use crate::shared::error::PipelineError;
use crate::stages::domain::frame_stage::FrameStage;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Orchestrates one processing run: opens the source, hands everything to
/// the executor, reports what happened.
///
/// Single-use: `execute` consumes the owned components, so a second call
/// fails with [`PipelineError::AlreadyExecuted`].
pub struct ProcessVideoUseCase {
    reader: Option<Box<dyn VideoReader>>,
    writer: Option<Box<dyn VideoWriter>>,
    stages: Option<Vec<Box<dyn FrameStage>>>,
    executor: Box<dyn PipelineExecutor>,
    on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
}

impl ProcessVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        stages: Vec<Box<dyn FrameStage>>,
        executor: Box<dyn PipelineExecutor>,
        on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
    ) -> Self {
        Self {
            reader: Some(reader),
            writer: Some(writer),
            stages: Some(stages),
            executor,
            on_progress,
        }
    }

    pub fn execute(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<ProcessingReport, PipelineError> {
        let mut reader = self.reader.take().ok_or(PipelineError::AlreadyExecuted)?;
        let writer = self.writer.take().ok_or(PipelineError::AlreadyExecuted)?;
        let stages = self.stages.take().ok_or(PipelineError::AlreadyExecuted)?;

        let metadata = match reader.open(input) {
            Ok(metadata) => metadata,
            Err(e) => {
                reader.close();
                return Err(e.into());
            }
        };
        log::info!(
            "processing {} ({}x{} @ {:.2} fps, {} stage(s))",
            input.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            stages.len()
        );

        let config = PipelineConfig {
            on_progress: self.on_progress.take(),
        };
        self.executor
            .execute(reader, writer, stages, &metadata, output, config)
    }
}
