use ndarray::{ArrayView3, ArrayViewMut3};

/// Samples per pixel. Every frame in the pipeline is packed RGB.
pub const CHANNELS: usize = 3;

/// One decoded video frame: contiguous RGB bytes in row-major order, plus
/// its position in decode order.
///
/// A frame is owned by the loop iteration that decoded it and is dropped
/// after it is written, so frames carry no cross-iteration state. `Clone`
/// is a deep copy; stages that return a clone never alias their input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// A frame filled with a single color. Used by fixtures and tests.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3], index: usize) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Position in decode order, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// (height, width, channel) view for per-pixel inspection.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}
