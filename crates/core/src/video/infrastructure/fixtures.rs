//! On-disk fixture videos for codec round-trip tests.

use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;
use crate::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Encodes `frames` at `fps`. Panics on failure; fixture setup only.
pub fn write_video(path: &Path, frames: &[Frame], fps: f64) {
    assert!(!frames.is_empty(), "fixture needs at least one frame");
    let metadata = VideoMetadata {
        width: frames[0].width(),
        height: frames[0].height(),
        fps,
        total_frames: frames.len(),
        codec: String::new(),
        source_path: None,
    };

    let mut writer = FfmpegWriter::new();
    writer.open(path, &metadata).unwrap();
    for frame in frames {
        writer.write(frame).unwrap();
    }
    writer.close().unwrap();
}

/// Brightness used for fixture frame `i`; spaced widely enough to survive
/// lossy encoding recognizably.
pub fn gray_level(i: usize) -> u8 {
    ((i * 40) % 256) as u8
}

/// Writes `count` solid gray frames stepping through [`gray_level`].
pub fn write_gray_video(path: &Path, count: usize, width: u32, height: u32, fps: f64) {
    let frames: Vec<Frame> = (0..count)
        .map(|i| Frame::solid(width, height, [gray_level(i); 3], i))
        .collect();
    write_video(path, &frames, fps);
}

/// Frames with enough spatial structure that every enhancement stage has
/// work to do: a diagonal gradient plus a per-frame brightness offset.
pub fn textured_frames(count: usize, width: u32, height: u32) -> Vec<Frame> {
    (0..count)
        .map(|i| {
            let mut data = Vec::with_capacity((width * height * 3) as usize);
            for y in 0..height {
                for x in 0..width {
                    let base = (x * 2 + y * 3 + i as u32 * 10) % 160;
                    data.push((40 + base) as u8);
                    data.push((60 + base / 2) as u8);
                    data.push((80 + base / 3) as u8);
                }
            }
            Frame::new(data, width, height, i)
        })
        .collect()
}
