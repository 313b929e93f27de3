/// Container extensions accepted at the front door. Whether a file really
/// decodes is decided by the codec layer, not by its name.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// Non-local-means filter strength for the lightness plane.
pub const DENOISE_LUMA_STRENGTH: f32 = 10.0;
/// Non-local-means filter strength for the two chroma planes.
pub const DENOISE_COLOR_STRENGTH: f32 = 10.0;
/// Side length of the patch compared between pixels. Must be odd.
pub const DENOISE_TEMPLATE_WINDOW: usize = 7;
/// Side length of the neighborhood searched for similar patches. Must be odd.
pub const DENOISE_SEARCH_WINDOW: usize = 21;

/// Per-tile contrast amplification cap, in multiples of a uniform histogram bin.
pub const CONTRAST_CLIP_LIMIT: f32 = 2.0;
/// Tile grid (per axis) for local histogram equalization.
pub const CONTRAST_TILE_GRID: usize = 8;

/// Unity-gain sharpening kernel (sums to 1).
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [
    [-1.0, -1.0, -1.0],
    [-1.0, 9.0, -1.0],
    [-1.0, -1.0, -1.0],
];

/// Filename prefix for derived watermark-removal outputs.
pub const WATERMARK_OUTPUT_PREFIX: &str = "nowatermark_";
/// Filename prefix for derived enhancement outputs.
pub const ENHANCE_OUTPUT_PREFIX: &str = "enhanced_";
