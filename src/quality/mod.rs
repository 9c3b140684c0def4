/// Capture quality validation module
///
/// Decides whether a captured tongue photo is usable: bright enough, in
/// focus, and showing a plausibly shaped tongue region. Every analyzer works
/// directly on the RGBA pixels; no vision library is involved.
pub mod blur;
pub mod color;
pub mod contour;
pub mod edges;
pub mod exposure;
pub mod grayscale;
pub mod shape;
pub mod validator;

pub use blur::{BlurDetector, BlurMetrics};
pub use color::{ColorMask, ColorMetrics};
pub use contour::{find_contours, Contour};
pub use edges::GradientMap;
pub use exposure::{ExposureAnalyzer, ExposureMetrics};
pub use grayscale::GrayscaleBuffer;
pub use shape::{BoundingBox, ShapeClassifier, ShapeMetrics, ShapeVerdict, TargetShapeDetector};
pub use validator::{
    validate, QualityReport, QualityValidator, RejectionReason, ValidationResult,
    ValidationStage,
};
