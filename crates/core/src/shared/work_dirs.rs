use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::VIDEO_EXTENSIONS;

/// Where incoming files land and derived outputs are written.
///
/// Injected into callers instead of living in process globals, so the
/// pipeline functions stay path-parameterized and testable.
#[derive(Clone, Debug)]
pub struct WorkDirs {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl WorkDirs {
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Creates both directories if they do not exist yet.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.upload_dir)?;
        fs::create_dir_all(&self.output_dir)
    }

    /// Output path for `input`, named `<prefix><input file name>` inside
    /// the output directory.
    pub fn derived_output(&self, input: &Path, prefix: &str) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out.mp4".to_string());
        self.output_dir.join(format!("{prefix}{name}"))
    }
}

impl Default for WorkDirs {
    fn default() -> Self {
        Self::new("uploads", "output")
    }
}

/// Extension-level check that a path names a supported video container.
pub fn is_supported_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
