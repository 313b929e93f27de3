use std::path::{Path, PathBuf};

use crate::shared::error::OpenError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

/// Decodes frames via ffmpeg-next (libavformat + libavcodec).
///
/// Every decoded frame is converted to packed RGB24 before it leaves this
/// module; nothing downstream sees codec pixel formats or strides.
pub struct FfmpegReader {
    input: Option<ffmpeg_next::format::context::Input>,
    stream_index: usize,
    path: PathBuf,
}

// Safety: the reader is driven from one thread at a time; the raw
// pointers inside ffmpeg types are never shared.
unsafe impl Send for FfmpegReader {}

impl FfmpegReader {
    pub fn new() -> Self {
        Self {
            input: None,
            stream_index: 0,
            path: PathBuf::new(),
        }
    }
}

impl Default for FfmpegReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, OpenError> {
        self.path = path.to_path_buf();
        ffmpeg_next::init().map_err(|e| OpenError::new(path, e.to_string()))?;

        let input =
            ffmpeg_next::format::input(path).map_err(|e| OpenError::new(path, e.to_string()))?;
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| OpenError::new(path, "no video stream"))?;
        let stream_index = stream.index();

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .and_then(|ctx| ctx.decoder().video())
            .map_err(|e| OpenError::new(path, e.to_string()))?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        } else {
            0.0
        };

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            total_frames: stream.frames().max(0) as usize,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        self.stream_index = stream_index;
        self.input = Some(input);
        Ok(metadata)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, OpenError>> + '_> {
        let path = self.path.clone();
        let stream_index = self.stream_index;
        let Some(input) = self.input.as_mut() else {
            return Box::new(std::iter::once(Err(OpenError::new(
                path,
                "reader is not open",
            ))));
        };

        let decoder = match input
            .stream(stream_index)
            .ok_or(ffmpeg_next::Error::StreamNotFound)
            .and_then(|s| ffmpeg_next::codec::context::Context::from_parameters(s.parameters()))
            .and_then(|ctx| ctx.decoder().video())
        {
            Ok(decoder) => decoder,
            Err(e) => {
                return Box::new(std::iter::once(Err(OpenError::new(path, e.to_string()))));
            }
        };

        let width = decoder.width();
        let height = decoder.height();
        let scaler = match ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        ) {
            Ok(scaler) => scaler,
            Err(e) => {
                return Box::new(std::iter::once(Err(OpenError::new(path, e.to_string()))));
            }
        };

        Box::new(RgbFrames {
            input,
            decoder,
            scaler,
            width,
            height,
            stream_index,
            path,
            next_index: 0,
            flushing: false,
            done: false,
        })
    }

    fn close(&mut self) {
        self.input = None;
    }
}

/// Lazy forward-only frame iterator: decodes on demand, so at most one
/// frame is resident between pipeline iterations.
struct RgbFrames<'a> {
    input: &'a mut ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
    stream_index: usize,
    path: PathBuf,
    next_index: usize,
    flushing: bool,
    done: bool,
}

impl RgbFrames<'_> {
    /// Pulls the next decoded frame out of the codec, if one is ready.
    fn receive(&mut self) -> Option<Result<Frame, OpenError>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return None;
        }

        let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
        if let Err(e) = self.scaler.run(&decoded, &mut rgb) {
            return Some(Err(OpenError::new(&self.path, e.to_string())));
        }

        let frame = Frame::new(
            packed_rgb(&rgb, self.width, self.height),
            self.width,
            self.height,
            self.next_index,
        );
        self.next_index += 1;
        Some(Ok(frame))
    }
}

impl Iterator for RgbFrames<'_> {
    type Item = Result<Frame, OpenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(item) = self.receive() {
                if item.is_err() {
                    self.done = true;
                }
                return Some(item);
            }
            if self.flushing {
                self.done = true;
                return None;
            }
            match self
                .input
                .packets()
                .find(|(stream, _)| stream.index() == self.stream_index)
            {
                Some((_, packet)) => {
                    // A packet the decoder rejects is dropped; the demuxer
                    // keeps feeding the next one.
                    let _ = self.decoder.send_packet(&packet);
                }
                None => {
                    let _ = self.decoder.send_eof();
                    self.flushing = true;
                }
            }
        }
    }
}

/// Strips row padding: ffmpeg lines are stride-aligned, frames are packed.
fn packed_rgb(rgb: &ffmpeg_next::util::frame::video::Video, width: u32, height: u32) -> Vec<u8> {
    let stride = rgb.stride(0);
    let src = rgb.data(0);
    let row_len = width as usize * 3;
    let mut out = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        out.extend_from_slice(&src[start..start + row_len]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::infrastructure::fixtures;

    #[test]
    fn test_open_reports_native_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        fixtures::write_gray_video(&path, 5, 160, 120, 30.0);

        let mut reader = FfmpegReader::new();
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.width, 160);
        assert_eq!(meta.height, 120);
        assert!(meta.fps > 0.0);
        assert_eq!(meta.source_path, Some(path));
    }

    #[test]
    fn test_open_nonexistent_path_fails() {
        let mut reader = FfmpegReader::new();
        let err = reader.open(Path::new("/nonexistent/in.mp4")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/in.mp4"));
    }

    #[test]
    fn test_open_non_video_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.mp4");
        std::fs::write(&path, b"this is not a container").unwrap();

        let mut reader = FfmpegReader::new();
        assert!(reader.open(&path).is_err());
    }

    #[test]
    fn test_frames_yields_every_frame_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        fixtures::write_gray_video(&path, 5, 160, 120, 30.0);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        let frames: Vec<_> = reader.frames().collect();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.is_ok()));
    }

    #[test]
    fn test_frames_arrive_in_decode_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        fixtures::write_gray_video(&path, 6, 160, 120, 30.0);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        for (i, frame) in reader.frames().map(|f| f.unwrap()).enumerate() {
            assert_eq!(frame.index(), i);
        }
    }

    #[test]
    fn test_frames_are_packed_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        fixtures::write_gray_video(&path, 2, 160, 120, 30.0);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        let frame = reader.frames().next().unwrap().unwrap();
        assert_eq!(frame.data().len(), 160 * 120 * 3);
    }

    #[test]
    fn test_frames_before_open_yields_error() {
        let mut reader = FfmpegReader::new();
        let first = reader.frames().next().unwrap();
        assert!(first.is_err());
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.mp4");
        fixtures::write_gray_video(&path, 1, 160, 120, 30.0);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        reader.close();
        reader.close();
    }
}
