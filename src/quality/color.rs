/// Candidate-region color mask
///
/// Classifies pixels as tongue-colored (reddish/pink) with a fixed RGB rule
/// and reports the candidate fraction. A frame below the minimum fraction
/// cannot contain the target, so the expensive edge stage is skipped.
use crate::assert_invariant;
use crate::config::ColorConfig;
use crate::types::{Frame, Rgba};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMetrics {
    pub candidate_pixels: usize,
    pub total_pixels: usize,
    /// `candidate_pixels / total_pixels`, in `[0, 1]`
    pub candidate_ratio: f64,
    pub passes_gate: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ColorMask {
    config: ColorConfig,
}

impl ColorMask {
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ColorConfig {
        &self.config
    }

    #[inline]
    pub fn is_candidate(&self, px: Rgba) -> bool {
        px.r > self.config.red_min && px.g < self.config.green_max && px.b < self.config.blue_max
    }

    /// Per-pixel mask, row-major.
    pub fn build_mask(&self, frame: &Frame) -> Vec<bool> {
        frame.pixels().map(|px| self.is_candidate(px)).collect()
    }

    pub fn analyze_frame(&self, frame: &Frame) -> ColorMetrics {
        assert_invariant!(
            frame.is_valid(),
            "Frame buffer holds width * height RGBA pixels",
            "quality::color"
        );

        let total_pixels = frame.pixel_count();
        let candidate_pixels = frame.pixels().filter(|&px| self.is_candidate(px)).count();
        let candidate_ratio = candidate_pixels as f64 / total_pixels as f64;
        let passes_gate = candidate_ratio >= self.config.min_candidate_ratio;

        log::debug!(
            "Color: {}/{} candidate pixels, ratio {:.4} (min {:.4})",
            candidate_pixels,
            total_pixels,
            candidate_ratio,
            self.config.min_candidate_ratio
        );

        ColorMetrics {
            candidate_pixels,
            total_pixels,
            candidate_ratio,
            passes_gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_rule_is_strict() {
        let mask = ColorMask::default();
        assert!(mask.is_candidate(Rgba::opaque(121, 89, 99)));
        assert!(!mask.is_candidate(Rgba::opaque(120, 40, 40)));
        assert!(!mask.is_candidate(Rgba::opaque(200, 90, 40)));
        assert!(!mask.is_candidate(Rgba::opaque(200, 40, 100)));
        assert!(!mask.is_candidate(Rgba::gray(255)));
    }

    #[test]
    fn test_ratio_and_gate() {
        // 2 of 100 pixels are red: exactly at the 0.02 gate, which passes.
        let frame = Frame::from_fn(10, 10, |x, y| {
            if y == 0 && x < 2 {
                Rgba::opaque(220, 30, 60)
            } else {
                Rgba::opaque(0, 180, 0)
            }
        })
        .unwrap();
        let metrics = ColorMask::default().analyze_frame(&frame);

        assert_eq!(metrics.candidate_pixels, 2);
        assert_eq!(metrics.total_pixels, 100);
        assert_eq!(metrics.candidate_ratio, 0.02);
        assert!(metrics.passes_gate);
    }

    #[test]
    fn test_no_candidates_fails_gate() {
        let frame = Frame::from_fn(8, 8, |_, _| Rgba::opaque(0, 255, 0)).unwrap();
        let metrics = ColorMask::default().analyze_frame(&frame);
        assert_eq!(metrics.candidate_ratio, 0.0);
        assert!(!metrics.passes_gate);
    }

    #[test]
    fn test_build_mask_matches_count() {
        let frame = Frame::from_fn(6, 4, |x, _| {
            if x % 3 == 0 {
                Rgba::opaque(180, 50, 70)
            } else {
                Rgba::gray(40)
            }
        })
        .unwrap();
        let color = ColorMask::default();
        let mask = color.build_mask(&frame);

        assert_eq!(mask.len(), 24);
        assert_eq!(
            mask.iter().filter(|&&m| m).count(),
            color.analyze_frame(&frame).candidate_pixels
        );
    }
}
