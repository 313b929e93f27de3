pub mod constants;
pub mod error;
pub mod frame;
pub mod video_metadata;
pub mod work_dirs;
