use std::path::{Path, PathBuf};

use thiserror::Error;

/// A source could not be opened or decoded, or a sink could not be
/// created with the requested encoding.
#[derive(Debug, Error)]
#[error("cannot open {}: {reason}", path.display())]
pub struct OpenError {
    pub path: PathBuf,
    pub reason: String,
}

impl OpenError {
    pub fn new(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// A frame could not be encoded into the output container.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("frame {frame} is {got_width}x{got_height} but the sink was opened at {want_width}x{want_height}")]
    ShapeMismatch {
        frame: usize,
        got_width: u32,
        got_height: u32,
        want_width: u32,
        want_height: u32,
    },
    #[error("writer is not open")]
    NotOpened,
    #[error("encoder: {0}")]
    Backend(String),
}

/// A transform failed on one frame. There is no per-frame recovery, so
/// this aborts the whole run.
#[derive(Debug, Error)]
#[error("stage '{stage}' failed on frame {frame}: {reason}")]
pub struct StageError {
    pub stage: &'static str,
    pub frame: usize,
    pub reason: String,
}

impl StageError {
    pub fn new(stage: &'static str, frame: usize, reason: impl Into<String>) -> Self {
        Self {
            stage,
            frame,
            reason: reason.into(),
        }
    }
}

/// Every way a pipeline run can end other than success.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Open(#[from] OpenError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error("pipeline already executed")]
    AlreadyExecuted,
}
