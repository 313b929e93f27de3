use std::path::Path;

use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, ProcessingReport};
use crate::shared::error::{PipelineError, StageError};
use crate::shared::video_metadata::VideoMetadata;
use crate::stages::domain::frame_stage::FrameStage;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Strictly sequential executor: one frame in flight, stages applied in
/// order, each result written before the next read.
///
/// Source and sink are released on every exit path, so a failed run still
/// leaves a finalized (if truncated) container behind, never a corrupt
/// half-open one.
pub struct SequentialPipelineExecutor;

impl SequentialPipelineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for SequentialPipelineExecutor {
    fn execute(
        &self,
        mut reader: Box<dyn VideoReader>,
        mut writer: Box<dyn VideoWriter>,
        stages: Vec<Box<dyn FrameStage>>,
        metadata: &VideoMetadata,
        output_path: &Path,
        config: PipelineConfig,
    ) -> Result<ProcessingReport, PipelineError> {
        if let Err(e) = writer.open(output_path, metadata) {
            reader.close();
            return Err(e.into());
        }

        let result = run_loop(&mut *reader, &mut *writer, &stages, metadata, &config);

        reader.close();
        let closed = writer.close();

        let report = result?;
        closed?;

        if report.frames_read == 0 {
            log::warn!("{}: source produced no frames", output_path.display());
        }
        Ok(report)
    }
}

fn run_loop(
    reader: &mut dyn VideoReader,
    writer: &mut dyn VideoWriter,
    stages: &[Box<dyn FrameStage>],
    metadata: &VideoMetadata,
    config: &PipelineConfig,
) -> Result<ProcessingReport, PipelineError> {
    let mut report = ProcessingReport::default();

    for next in reader.frames() {
        let mut frame = next?;
        report.frames_read += 1;

        for stage in stages {
            let out = stage.apply(&frame)?;
            if !metadata.matches(&out) {
                return Err(StageError::new(
                    stage.name(),
                    frame.index(),
                    format!(
                        "changed dimensions from {}x{} to {}x{}",
                        metadata.width,
                        metadata.height,
                        out.width(),
                        out.height()
                    ),
                )
                .into());
            }
            frame = out;
        }

        writer.write(&frame)?;
        report.frames_written += 1;

        if let Some(on_progress) = &config.on_progress {
            on_progress(report.frames_written, metadata.total_frames);
        }
    }

    Ok(report)
}
