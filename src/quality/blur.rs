/// Blur detection
///
/// Sharpness is judged by the spread of the absolute Laplacian response:
/// a defocused capture has smooth second derivatives and a low variance.
use super::grayscale::{GrayscaleBuffer, LAPLACIAN_KERNEL};
use crate::assert_invariant;
use crate::config::SharpnessConfig;
use crate::types::Frame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurMetrics {
    /// Population variance of `|Laplacian|` over the whole frame
    pub laplacian_variance: f64,
    pub is_sharp: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BlurDetector {
    config: SharpnessConfig,
}

impl BlurDetector {
    pub fn new(config: SharpnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SharpnessConfig {
        &self.config
    }

    pub fn analyze_frame(&self, frame: &Frame) -> BlurMetrics {
        let gray = GrayscaleBuffer::from_frame(frame);
        let response = laplacian_response(&gray);
        let laplacian_variance = population_variance(&response);
        let is_sharp = laplacian_variance > self.config.min_laplacian_variance;

        log::debug!(
            "Sharpness: Laplacian variance {:.2} (min {:.2})",
            laplacian_variance,
            self.config.min_laplacian_variance
        );

        BlurMetrics {
            laplacian_variance,
            is_sharp,
        }
    }
}

/// Absolute Laplacian response, valid mode. The border ring is zero and
/// remains part of the buffer.
pub fn laplacian_response(gray: &GrayscaleBuffer) -> Vec<f32> {
    let response =
        gray.map_interior(|g, x, y| g.convolve_at(&LAPLACIAN_KERNEL, x, y).abs() as f32);

    assert_invariant!(
        response.len() == gray.width() * gray.height(),
        "Laplacian response covers every pixel",
        "quality::blur"
    );
    response
}

/// Variance dividing by `N`. Empty input has zero variance.
pub fn population_variance(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    #[test]
    fn test_population_variance() {
        assert_eq!(population_variance(&[]), 0.0);
        assert_eq!(population_variance(&[3.0, 3.0, 3.0]), 0.0);
        // N, not N - 1
        assert_eq!(population_variance(&[0.0, 2.0]), 1.0);
        assert_eq!(population_variance(&[1.0, 2.0, 3.0, 4.0]), 1.25);
    }

    #[test]
    fn test_uniform_frame_has_zero_variance() {
        let frame = Frame::from_fn(16, 12, |_, _| Rgba::opaque(201, 77, 13)).unwrap();
        let metrics = BlurDetector::default().analyze_frame(&frame);
        assert_eq!(metrics.laplacian_variance, 0.0);
        assert!(!metrics.is_sharp);
    }

    #[test]
    fn test_single_bright_pixel_response() {
        // 3x3 frame: only the centre has an interior response.
        let frame = Frame::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                Rgba::gray(100)
            } else {
                Rgba::gray(0)
            }
        })
        .unwrap();
        let gray = GrayscaleBuffer::from_frame(&frame);
        let response = laplacian_response(&gray);

        assert_eq!(response.iter().filter(|&&v| v != 0.0).count(), 1);
        assert!((response[4] - 800.0).abs() < 0.01);
    }

    #[test]
    fn test_border_zeros_count_towards_variance() {
        // Every interior response equals 4 * 255 on a one-pixel checkerboard;
        // the variance comes only from the zero border ring.
        let frame = Frame::from_fn(10, 10, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba::gray(255)
            } else {
                Rgba::gray(0)
            }
        })
        .unwrap();
        let metrics = BlurDetector::default().analyze_frame(&frame);

        let p = 64.0 / 100.0;
        let expected = p * (1.0 - p) * 1020.0f64.powi(2);
        assert!((metrics.laplacian_variance - expected).abs() < 1.0);
        assert!(metrics.is_sharp);
    }

    #[test]
    fn test_threshold_is_strict() {
        let frame = Frame::from_fn(16, 12, |_, _| Rgba::gray(128)).unwrap();
        let detector = BlurDetector::new(SharpnessConfig {
            min_laplacian_variance: 0.0,
        });
        // 0 > 0 is false
        assert!(!detector.analyze_frame(&frame).is_sharp);
    }
}
