/// Grayscale conversion and 3x3 valid-mode convolution
///
/// Both the sharpness and the edge analyzers build their own
/// [`GrayscaleBuffer`] from the frame; nothing is shared between them.
use crate::assert_invariant;
use crate::types::Frame;

/// 3x3 integer kernel, row-major, `kernel[ky][kx]`.
pub type Kernel3 = [[i32; 3]; 3];

/// Discrete Laplacian with 8-connected neighborhood.
pub const LAPLACIAN_KERNEL: Kernel3 = [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]];

/// Horizontal Sobel derivative.
pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical Sobel derivative.
pub const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// One BT.601 luminance sample per pixel, kept as `f32` so nothing clips.
#[derive(Debug, Clone)]
pub struct GrayscaleBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl GrayscaleBuffer {
    pub fn from_frame(frame: &Frame) -> Self {
        assert_invariant!(
            frame.is_valid(),
            "Frame buffer holds width * height RGBA pixels",
            "quality::grayscale"
        );

        let data: Vec<f32> = frame.pixels().map(|px| px.luminance()).collect();
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        assert_invariant!(
            data.len() == width * height,
            "Grayscale buffer has one sample per pixel",
            "quality::grayscale"
        );

        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Kernel response centred on `(x, y)`. The caller guarantees the full
    /// 3x3 neighborhood lies inside the buffer.
    ///
    /// Accumulates in `f64`: every luminance sample is an `f32`, so the nine
    /// weighted terms add up exactly and a flat patch yields exactly zero.
    #[inline]
    pub fn convolve_at(&self, kernel: &Kernel3, x: usize, y: usize) -> f64 {
        let mut sum = 0.0f64;
        for (ky, row) in kernel.iter().enumerate() {
            let base = (y + ky - 1) * self.width + x - 1;
            for (kx, &weight) in row.iter().enumerate() {
                sum += self.data[base + kx] as f64 * weight as f64;
            }
        }
        sum
    }

    /// Evaluate `op` on every interior pixel; the one-pixel border ring stays
    /// zero. Frames narrower or shorter than three pixels have no interior
    /// and produce an all-zero map.
    pub fn map_interior<F>(&self, mut op: F) -> Vec<f32>
    where
        F: FnMut(&Self, usize, usize) -> f32,
    {
        let mut out = vec![0.0f32; self.width * self.height];
        if self.width < 3 || self.height < 3 {
            return out;
        }

        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                out[y * self.width + x] = op(self, x, y);
            }
        }
        out
    }
}
