//! Per-frame video processing: watermark removal (a pass-through slot
//! today) and quality enhancement (denoise, local contrast, sharpen).
//!
//! Format conversion happens at the I/O boundary; everything between the
//! reader and the writer works on packed RGB [`shared::frame::Frame`]s.

pub mod pipeline;
pub mod shared;
pub mod stages;
pub mod video;

pub use pipeline::{enhance_video, remove_watermark};
