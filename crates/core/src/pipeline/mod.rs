pub mod infrastructure;
pub mod pipeline_executor;
pub mod process_video_use_case;

use std::path::Path;

use crate::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
use crate::pipeline::pipeline_executor::ProcessingReport;
use crate::pipeline::process_video_use_case::ProcessVideoUseCase;
use crate::shared::error::PipelineError;
use crate::stages::domain::frame_stage::FrameStage;
use crate::stages::infrastructure::{enhancement_chain, watermark_chain};
use crate::video::infrastructure::ffmpeg_reader::FfmpegReader;
use crate::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Runs `input` through the watermark-removal pipeline into `output`.
///
/// The watermark stage is a pass-through for now, so this re-encodes the
/// source pixels at the original rate and dimensions. Callers that need a
/// boolean outcome map `Err` to failure; no panic crosses this boundary.
pub fn remove_watermark(input: &Path, output: &Path) -> Result<ProcessingReport, PipelineError> {
    run(input, output, watermark_chain())
}

/// Runs `input` through the quality-enhancement pipeline (denoise, local
/// contrast equalization, sharpen) into `output`.
pub fn enhance_video(input: &Path, output: &Path) -> Result<ProcessingReport, PipelineError> {
    run(input, output, enhancement_chain())
}

fn run(
    input: &Path,
    output: &Path,
    stages: Vec<Box<dyn FrameStage>>,
) -> Result<ProcessingReport, PipelineError> {
    ProcessVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        stages,
        Box::new(SequentialPipelineExecutor::new()),
        None,
    )
    .execute(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use crate::video::domain::video_reader::VideoReader;
    use crate::video::infrastructure::fixtures;

    fn decode_all(path: &Path) -> (crate::shared::video_metadata::VideoMetadata, Vec<Frame>) {
        let mut reader = FfmpegReader::new();
        let metadata = reader.open(path).unwrap();
        let frames = reader.frames().map(|f| f.unwrap()).collect();
        reader.close();
        (metadata, frames)
    }

    fn mean_abs_diff(a: &Frame, b: &Frame) -> f64 {
        a.data()
            .iter()
            .zip(b.data())
            .map(|(&x, &y)| (x as i32 - y as i32).abs() as f64)
            .sum::<f64>()
            / a.data().len() as f64
    }

    #[test]
    fn test_watermark_removal_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        let originals = fixtures::textured_frames(10, 64, 48);
        fixtures::write_video(&input, &originals, 30.0);

        let report = remove_watermark(&input, &output).unwrap();
        assert_eq!(report.frames_read, 10);
        assert_eq!(report.frames_written, 10);

        let (metadata, frames) = decode_all(&output);
        assert_eq!(metadata.width, 64);
        assert_eq!(metadata.height, 48);
        assert!((metadata.fps - 30.0).abs() < 0.5);
        assert_eq!(frames.len(), 10);

        // The stage itself is the identity; only codec loss separates the
        // decoded input from the decoded output.
        let (_, decoded_inputs) = decode_all(&input);
        for (input_frame, output_frame) in decoded_inputs.iter().zip(&frames) {
            assert!(
                mean_abs_diff(input_frame, output_frame) < 12.0,
                "frame {} drifted",
                input_frame.index()
            );
        }
    }

    #[test]
    fn test_enhancement_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        fixtures::write_video(&input, &fixtures::textured_frames(10, 64, 48), 30.0);

        let report = enhance_video(&input, &output).unwrap();
        assert_eq!(report.frames_read, 10);
        assert_eq!(report.frames_written, 10);

        let (metadata, frames) = decode_all(&output);
        assert_eq!(metadata.width, 64);
        assert_eq!(metadata.height, 48);
        assert!((metadata.fps - 30.0).abs() < 0.5);
        assert_eq!(frames.len(), 10);

        // Enhancement is not the identity.
        let (_, decoded_inputs) = decode_all(&input);
        for (input_frame, output_frame) in decoded_inputs.iter().zip(&frames) {
            assert_eq!(output_frame.width(), input_frame.width());
            assert_eq!(output_frame.height(), input_frame.height());
            assert!(mean_abs_diff(input_frame, output_frame) > 1.0);
        }
    }

    #[test]
    fn test_enhancement_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        fixtures::write_video(&input, &fixtures::textured_frames(3, 64, 48), 30.0);

        let out_a = dir.path().join("a.mp4");
        let out_b = dir.path().join("b.mp4");
        enhance_video(&input, &out_a).unwrap();
        enhance_video(&input, &out_b).unwrap();

        let (_, frames_a) = decode_all(&out_a);
        let (_, frames_b) = decode_all(&out_b);
        assert_eq!(frames_a.len(), frames_b.len());
        for (a, b) in frames_a.iter().zip(&frames_b) {
            assert_eq!(a.data(), b.data());
        }
    }

    #[test]
    fn test_nonexistent_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");

        let err = remove_watermark(Path::new("/nonexistent/in.mp4"), &output).unwrap_err();
        assert!(matches!(err, PipelineError::Open(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_non_video_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&input, b"just some text pretending to be video").unwrap();

        let err = enhance_video(&input, &output).unwrap_err();
        assert!(matches!(err, PipelineError::Open(_)));
        assert!(!output.exists());
    }
}
