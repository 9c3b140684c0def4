/// Sobel edge detection
use super::grayscale::{GrayscaleBuffer, SOBEL_X, SOBEL_Y};
use crate::assert_invariant;
use crate::types::Frame;

/// Per-pixel gradient magnitude. The one-pixel border ring is zero.
#[derive(Debug, Clone)]
pub struct GradientMap {
    width: usize,
    height: usize,
    magnitudes: Vec<f32>,
}

impl GradientMap {
    /// Sobel magnitude `sqrt(gx² + gy²)` on a freshly converted grayscale.
    pub fn from_frame(frame: &Frame) -> Self {
        Self::sobel(&GrayscaleBuffer::from_frame(frame))
    }

    pub fn sobel(gray: &GrayscaleBuffer) -> Self {
        let magnitudes = gray.map_interior(|g, x, y| {
            let gx = g.convolve_at(&SOBEL_X, x, y);
            let gy = g.convolve_at(&SOBEL_Y, x, y);
            (gx * gx + gy * gy).sqrt() as f32
        });

        let map = Self {
            width: gray.width(),
            height: gray.height(),
            magnitudes,
        };

        assert_invariant!(
            map.border_is_zero(),
            "Gradient border ring stays zero",
            "quality::edges"
        );
        map
    }

    /// Build a map from raw magnitudes, e.g. for exercising contour tracing
    /// on a hand-made edge layout. Returns `None` on a size mismatch.
    pub fn from_magnitudes(width: usize, height: usize, magnitudes: Vec<f32>) -> Option<Self> {
        (magnitudes.len() == width * height).then_some(Self {
            width,
            height,
            magnitudes,
        })
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
        self.magnitudes[y * self.width + x]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.magnitudes
    }

    pub fn strong_edge_count(&self, threshold: f32) -> usize {
        self.magnitudes.iter().filter(|&&m| m > threshold).count()
    }

    fn border_is_zero(&self) -> bool {
        let (w, h) = (self.width, self.height);
        let row_zero = |y: usize| (0..w).all(|x| self.get(x, y) == 0.0);
        let col_zero = |x: usize| (0..h).all(|y| self.get(x, y) == 0.0);
        row_zero(0) && row_zero(h - 1) && col_zero(0) && col_zero(w - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    fn vertical_step(width: u32, height: u32, split: u32, left: u8, right: u8) -> Frame {
        Frame::from_fn(width, height, |x, _| {
            if x < split {
                Rgba::gray(left)
            } else {
                Rgba::gray(right)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_vertical_step_magnitude() {
        let frame = vertical_step(6, 5, 3, 0, 100);
        let map = GradientMap::from_frame(&frame);

        // Both columns touching the step see gx = 4 * 100.
        for y in 1..4 {
            assert!((map.get(2, y) - 400.0).abs() < 0.01);
            assert!((map.get(3, y) - 400.0).abs() < 0.01);
            assert_eq!(map.get(1, y), 0.0);
            assert_eq!(map.get(4, y), 0.0);
        }
        assert_eq!(map.strong_edge_count(50.0), 6);
    }

    #[test]
    fn test_border_is_zero_even_on_step() {
        let frame = vertical_step(6, 5, 1, 0, 255);
        let map = GradientMap::from_frame(&frame);
        for y in 0..5 {
            assert_eq!(map.get(0, y), 0.0);
            assert_eq!(map.get(5, y), 0.0);
        }
        for x in 0..6 {
            assert_eq!(map.get(x, 0), 0.0);
            assert_eq!(map.get(x, 4), 0.0);
        }
    }

    #[test]
    fn test_one_pixel_checkerboard_has_no_gradient() {
        let frame = Frame::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba::gray(255)
            } else {
                Rgba::gray(0)
            }
        })
        .unwrap();
        let map = GradientMap::from_frame(&frame);
        assert_eq!(map.strong_edge_count(0.5), 0);
    }

    #[test]
    fn test_from_magnitudes_checks_size() {
        assert!(GradientMap::from_magnitudes(3, 3, vec![0.0; 9]).is_some());
        assert!(GradientMap::from_magnitudes(3, 3, vec![0.0; 8]).is_none());
    }
}
