/// Capture validation orchestrator
///
/// Runs the analyzers cheapest first and stops at the first failing check:
/// brightness, sharpness, color ratio, then edge/contour shape.
use super::blur::{BlurDetector, BlurMetrics};
use super::color::{ColorMask, ColorMetrics};
use super::exposure::{ExposureAnalyzer, ExposureMetrics};
use super::shape::{ShapeMetrics, TargetShapeDetector};
use crate::config::ValidationConfig;
use crate::types::Frame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a capture was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    TooDark,
    TooBlurry,
    NoTargetDetected,
}

impl RejectionReason {
    /// Message shown to the person taking the photo.
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::TooDark => "The image is too dark. Please ensure proper lighting.",
            RejectionReason::TooBlurry => "The image is too blurry. Please ensure better focus.",
            RejectionReason::NoTargetDetected => {
                "No tongue detected. Please ensure your tongue is visible and centered."
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RejectionReason::TooDark => "too dark",
            RejectionReason::TooBlurry => "too blurry",
            RejectionReason::NoTargetDetected => "no target detected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationResult {
    Accepted,
    Rejected(RejectionReason),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            ValidationResult::Accepted => None,
            ValidationResult::Rejected(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Accepted => f.write_str("accepted"),
            ValidationResult::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

/// Checks in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStage {
    Brightness,
    Sharpness,
    ColorRatio,
    EdgeContour,
}

/// Verdict plus the metrics of every stage that actually ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub result: ValidationResult,
    pub stages: Vec<ValidationStage>,
    pub width: u32,
    pub height: u32,
    pub exposure: Option<ExposureMetrics>,
    pub blur: Option<BlurMetrics>,
    pub color: Option<ColorMetrics>,
    pub shape: Option<ShapeMetrics>,
}

impl QualityReport {
    fn new(frame: &Frame) -> Self {
        Self {
            result: ValidationResult::Accepted,
            stages: Vec::with_capacity(4),
            width: frame.width(),
            height: frame.height(),
            exposure: None,
            blur: None,
            color: None,
            shape: None,
        }
    }

    pub fn ran(&self, stage: ValidationStage) -> bool {
        self.stages.contains(&stage)
    }

    fn finish(mut self, result: ValidationResult) -> Self {
        self.result = result;
        match result {
            ValidationResult::Accepted => {
                log::info!("Capture {}x{} accepted", self.width, self.height)
            }
            ValidationResult::Rejected(reason) => log::info!(
                "Capture {}x{} rejected after {:?}: {}",
                self.width,
                self.height,
                self.stages.last(),
                reason
            ),
        }
        self
    }
}

/// Stateless validator; one instance can check any number of frames,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct QualityValidator {
    exposure: ExposureAnalyzer,
    blur: BlurDetector,
    color: ColorMask,
    shape: TargetShapeDetector,
}

impl QualityValidator {
    pub fn new(config: ValidationConfig) -> Self {
        let ValidationConfig {
            exposure,
            sharpness,
            color,
            contour,
        } = config;

        Self {
            exposure: ExposureAnalyzer::new(exposure),
            blur: BlurDetector::new(sharpness),
            color: ColorMask::new(color),
            shape: TargetShapeDetector::new(contour),
        }
    }

    pub fn config(&self) -> ValidationConfig {
        ValidationConfig {
            exposure: self.exposure.config().clone(),
            sharpness: self.blur.config().clone(),
            color: self.color.config().clone(),
            contour: self.shape.config().clone(),
        }
    }

    pub fn validate(&self, frame: &Frame) -> ValidationResult {
        self.validate_frame(frame).result
    }

    pub fn validate_frame(&self, frame: &Frame) -> QualityReport {
        let mut report = QualityReport::new(frame);

        report.stages.push(ValidationStage::Brightness);
        let exposure = self.exposure.analyze_frame(frame);
        let too_dark = exposure.is_too_dark;
        report.exposure = Some(exposure);
        if too_dark {
            return report.finish(ValidationResult::Rejected(RejectionReason::TooDark));
        }

        report.stages.push(ValidationStage::Sharpness);
        let blur = self.blur.analyze_frame(frame);
        let sharp = blur.is_sharp;
        report.blur = Some(blur);
        if !sharp {
            return report.finish(ValidationResult::Rejected(RejectionReason::TooBlurry));
        }

        report.stages.push(ValidationStage::ColorRatio);
        let color = self.color.analyze_frame(frame);
        let enough_color = color.passes_gate;
        report.color = Some(color);
        if !enough_color {
            return report.finish(ValidationResult::Rejected(
                RejectionReason::NoTargetDetected,
            ));
        }

        report.stages.push(ValidationStage::EdgeContour);
        let shape = self.shape.analyze_frame(frame);
        let detected = shape.target_detected;
        report.shape = Some(shape);
        if !detected {
            return report.finish(ValidationResult::Rejected(
                RejectionReason::NoTargetDetected,
            ));
        }

        report.finish(ValidationResult::Accepted)
    }
}

/// Validate with the default thresholds.
pub fn validate(frame: &Frame) -> ValidationResult {
    QualityValidator::default().validate(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExposureConfig;
    use crate::types::Rgba;

    #[test]
    fn test_all_black_is_too_dark() {
        let frame = Frame::from_fn(32, 32, |_, _| Rgba::gray(0)).unwrap();
        let report = QualityValidator::default().validate_frame(&frame);

        assert_eq!(
            report.result,
            ValidationResult::Rejected(RejectionReason::TooDark)
        );
        assert_eq!(report.stages, vec![ValidationStage::Brightness]);
        assert!(report.blur.is_none());
    }

    #[test]
    fn test_uniform_bright_is_too_blurry() {
        let frame = Frame::from_fn(32, 32, |_, _| Rgba::gray(180)).unwrap();
        let report = QualityValidator::default().validate_frame(&frame);

        assert_eq!(
            report.result,
            ValidationResult::Rejected(RejectionReason::TooBlurry)
        );
        assert_eq!(report.blur.as_ref().unwrap().laplacian_variance, 0.0);
        assert!(!report.ran(ValidationStage::ColorRatio));
    }

    #[test]
    fn test_overridden_threshold_changes_first_failure() {
        let frame = Frame::from_fn(32, 32, |_, _| Rgba::gray(20)).unwrap();
        let config = ValidationConfig {
            exposure: ExposureConfig { min_brightness: 10.0 },
            ..Default::default()
        };
        assert_eq!(
            QualityValidator::new(config).validate(&frame),
            ValidationResult::Rejected(RejectionReason::TooBlurry)
        );
    }

    #[test]
    fn test_config_round_trips_through_validator() {
        let mut config = ValidationConfig::default();
        config.contour.min_points = 123;
        assert_eq!(QualityValidator::new(config.clone()).config(), config);
    }

    #[test]
    fn test_messages_and_display() {
        assert!(RejectionReason::TooDark.message().contains("too dark"));
        assert!(RejectionReason::TooBlurry.message().contains("too blurry"));
        assert!(RejectionReason::NoTargetDetected
            .message()
            .contains("No tongue detected"));
        assert_eq!(
            ValidationResult::Rejected(RejectionReason::TooBlurry).to_string(),
            "rejected: too blurry"
        );
        assert_eq!(ValidationResult::Accepted.to_string(), "accepted");
    }

    #[test]
    fn test_result_serializes() {
        let json =
            serde_json::to_string(&ValidationResult::Rejected(RejectionReason::TooDark)).unwrap();
        assert_eq!(json, r#"{"Rejected":"TooDark"}"#);
    }
}
