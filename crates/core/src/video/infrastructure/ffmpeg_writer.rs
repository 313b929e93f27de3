use std::path::Path;

use crate::shared::error::{EncodeError, OpenError};
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// Encodes frames via ffmpeg-next using the MPEG4 part 2 codec ("mp4v"),
/// which stays decodable on essentially every player.
///
/// Frames arrive as packed RGB and are converted to YUV420P on the way
/// into the encoder.
pub struct FfmpegWriter {
    output: Option<ffmpeg_next::format::context::Output>,
    encoder: Option<ffmpeg_next::codec::encoder::video::Encoder>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    width: u32,
    height: u32,
    fps: i32,
    frames_written: usize,
}

// Safety: the writer is driven from one thread at a time; the raw
// pointers inside ffmpeg types are never shared.
unsafe impl Send for FfmpegWriter {}

impl FfmpegWriter {
    pub fn new() -> Self {
        Self {
            output: None,
            encoder: None,
            scaler: None,
            width: 0,
            height: 0,
            fps: 0,
            frames_written: 0,
        }
    }

    /// Frames successfully handed to the encoder so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl Default for FfmpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoWriter for FfmpegWriter {
    fn open(&mut self, path: &Path, metadata: &VideoMetadata) -> Result<(), OpenError> {
        if metadata.width == 0 || metadata.height == 0 {
            return Err(OpenError::new(path, "output dimensions must be nonzero"));
        }
        ffmpeg_next::init().map_err(|e| OpenError::new(path, e.to_string()))?;

        let mut output =
            ffmpeg_next::format::output(path).map_err(|e| OpenError::new(path, e.to_string()))?;
        let global_header = output
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4)
            .ok_or_else(|| OpenError::new(path, "MPEG4 encoder unavailable"))?;
        let mut stream = output
            .add_stream(Some(codec))
            .map_err(|e| OpenError::new(path, e.to_string()))?;

        let mut ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(|e| OpenError::new(path, e.to_string()))?;

        let fps = metadata.integer_fps();
        ctx.set_width(metadata.width);
        ctx.set_height(metadata.height);
        ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);
        ctx.set_time_base(ffmpeg_next::Rational(1, fps));
        ctx.set_frame_rate(Some(ffmpeg_next::Rational(fps, 1)));
        if global_header {
            ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let encoder = ctx
            .open_with(ffmpeg_next::Dictionary::new())
            .map_err(|e| OpenError::new(path, e.to_string()))?;
        stream.set_parameters(&encoder);

        output
            .write_header()
            .map_err(|e| OpenError::new(path, e.to_string()))?;

        let scaler = ffmpeg_next::software::scaling::Context::get(
            ffmpeg_next::format::Pixel::RGB24,
            metadata.width,
            metadata.height,
            ffmpeg_next::format::Pixel::YUV420P,
            metadata.width,
            metadata.height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| OpenError::new(path, e.to_string()))?;

        self.width = metadata.width;
        self.height = metadata.height;
        self.fps = fps;
        self.frames_written = 0;
        self.output = Some(output);
        self.encoder = Some(encoder);
        self.scaler = Some(scaler);
        log::debug!(
            "opened sink {} ({}x{} @ {fps} fps, mp4v)",
            path.display(),
            metadata.width,
            metadata.height
        );
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), EncodeError> {
        let encoder = self.encoder.as_mut().ok_or(EncodeError::NotOpened)?;
        if frame.width() != self.width || frame.height() != self.height {
            return Err(EncodeError::ShapeMismatch {
                frame: frame.index(),
                got_width: frame.width(),
                got_height: frame.height(),
                want_width: self.width,
                want_height: self.height,
            });
        }
        let scaler = self.scaler.as_mut().ok_or(EncodeError::NotOpened)?;
        let output = self.output.as_mut().ok_or(EncodeError::NotOpened)?;

        let mut rgb = ffmpeg_next::util::frame::video::Video::new(
            ffmpeg_next::format::Pixel::RGB24,
            self.width,
            self.height,
        );
        let stride = rgb.stride(0);
        let row_len = self.width as usize * 3;
        let dst = rgb.data_mut(0);
        for row in 0..self.height as usize {
            dst[row * stride..row * stride + row_len]
                .copy_from_slice(&frame.data()[row * row_len..(row + 1) * row_len]);
        }

        let mut yuv = ffmpeg_next::util::frame::video::Video::empty();
        scaler.run(&rgb, &mut yuv).map_err(backend)?;
        yuv.set_pts(Some(self.frames_written as i64));

        encoder.send_frame(&yuv).map_err(backend)?;
        drain(encoder, output, self.fps).map_err(backend)?;

        self.frames_written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), EncodeError> {
        // First close flushes and finalizes; later calls find nothing to do.
        let (Some(mut encoder), Some(mut output)) = (self.encoder.take(), self.output.take())
        else {
            self.scaler = None;
            return Ok(());
        };
        self.scaler = None;

        encoder.send_eof().map_err(backend)?;
        drain(&mut encoder, &mut output, self.fps).map_err(backend)?;
        output.write_trailer().map_err(backend)?;
        Ok(())
    }
}

/// Writes out every packet the encoder has ready.
fn drain(
    encoder: &mut ffmpeg_next::codec::encoder::video::Encoder,
    output: &mut ffmpeg_next::format::context::Output,
    fps: i32,
) -> Result<(), ffmpeg_next::Error> {
    let time_base = output
        .stream(0)
        .ok_or(ffmpeg_next::Error::StreamNotFound)?
        .time_base();
    let mut packet = ffmpeg_next::Packet::empty();
    while encoder.receive_packet(&mut packet).is_ok() {
        packet.set_stream(0);
        packet.rescale_ts(ffmpeg_next::Rational(1, fps), time_base);
        packet.write_interleaved(output)?;
    }
    Ok(())
}

fn backend(e: ffmpeg_next::Error) -> EncodeError {
    EncodeError::Backend(e.to_string())
}
