/// Exposure analysis
///
/// Global mean brightness of a frame, with a single "too dark" gate.
use crate::assert_invariant;
use crate::config::ExposureConfig;
use crate::types::Frame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureMetrics {
    /// Mean of `(R+G+B)/3` over all pixels, in `[0, 255]`
    pub mean_brightness: f64,
    pub is_too_dark: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExposureAnalyzer {
    config: ExposureConfig,
}

impl ExposureAnalyzer {
    pub fn new(config: ExposureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Mean brightness, unweighted across channels.
    ///
    /// Channels are summed as integers and divided once at the end, so a
    /// uniform gray frame reports its level exactly and darkening any channel
    /// can never raise the result.
    pub fn mean_brightness(frame: &Frame) -> f64 {
        assert_invariant!(
            frame.is_valid(),
            "Frame buffer holds width * height RGBA pixels",
            "quality::exposure"
        );

        let channel_sum: u64 = frame
            .pixels()
            .map(|px| px.r as u64 + px.g as u64 + px.b as u64)
            .sum();

        channel_sum as f64 / 3.0 / frame.pixel_count() as f64
    }

    pub fn analyze_frame(&self, frame: &Frame) -> ExposureMetrics {
        let mean_brightness = Self::mean_brightness(frame);
        let is_too_dark = mean_brightness < self.config.min_brightness;

        log::debug!(
            "Exposure: mean brightness {:.2} (min {:.2})",
            mean_brightness,
            self.config.min_brightness
        );

        ExposureMetrics {
            mean_brightness,
            is_too_dark,
        }
    }
}
