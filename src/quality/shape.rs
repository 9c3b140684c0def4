/// Shape classification of contours
///
/// A contour counts as the target when it is large enough and its bounding
/// box is elongated sideways within fixed bounds.
use super::contour::{find_contours, Contour};
use super::edges::GradientMap;
use crate::config::ContourConfig;
use crate::types::Frame;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a point set, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl BoundingBox {
    /// `None` for an empty point set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let init = Self {
            min_x: x0,
            max_x: x0,
            min_y: y0,
            max_y: y0,
        };

        Some(iter.fold(init, |b, (x, y)| Self {
            min_x: b.min_x.min(x),
            max_x: b.max_x.max(x),
            min_y: b.min_y.min(y),
            max_y: b.max_y.max(y),
        }))
    }

    /// Extent `max_x - min_x`; a single column has width zero.
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// `width / height`, or `None` when the box has zero height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match self.height() {
            0 => None,
            h => Some(self.width() as f64 / h as f64),
        }
    }
}

/// Outcome of classifying one contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeVerdict {
    TargetShaped { aspect_ratio: f64 },
    TooFewPoints { points: usize },
    /// Zero-height bounding box; the aspect ratio is undefined.
    Degenerate,
    AspectOutOfRange { aspect_ratio: f64 },
}

impl ShapeVerdict {
    pub fn is_target(&self) -> bool {
        matches!(self, ShapeVerdict::TargetShaped { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShapeClassifier {
    config: ContourConfig,
}

impl ShapeClassifier {
    pub fn new(config: ContourConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, contour: &Contour) -> ShapeVerdict {
        if contour.len() <= self.config.min_points {
            return ShapeVerdict::TooFewPoints {
                points: contour.len(),
            };
        }

        match contour.bounding_box().and_then(|b| b.aspect_ratio()) {
            None => ShapeVerdict::Degenerate,
            Some(aspect_ratio)
                if aspect_ratio > self.config.min_aspect_ratio
                    && aspect_ratio < self.config.max_aspect_ratio =>
            {
                ShapeVerdict::TargetShaped { aspect_ratio }
            }
            Some(aspect_ratio) => ShapeVerdict::AspectOutOfRange { aspect_ratio },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeMetrics {
    pub strong_edge_pixels: usize,
    pub contour_count: usize,
    /// Point count of the biggest contour, 0 when there is none
    pub largest_contour: usize,
    pub target_shaped_contours: usize,
    /// Bounding box of the first target-shaped contour
    pub target_bounds: Option<BoundingBox>,
    pub target_detected: bool,
}

/// Sobel edges, contour tracing and shape classification in one pass.
#[derive(Debug, Clone, Default)]
pub struct TargetShapeDetector {
    config: ContourConfig,
    classifier: ShapeClassifier,
}

impl TargetShapeDetector {
    pub fn new(config: ContourConfig) -> Self {
        Self {
            classifier: ShapeClassifier::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ContourConfig {
        &self.config
    }

    pub fn analyze_frame(&self, frame: &Frame) -> ShapeMetrics {
        let edges = GradientMap::from_frame(frame);
        self.analyze_edges(&edges)
    }

    pub fn analyze_edges(&self, edges: &GradientMap) -> ShapeMetrics {
        let threshold = self.config.edge_threshold;
        let contours = find_contours(edges, threshold);

        let mut target_shaped_contours = 0;
        let mut target_bounds = None;
        for contour in &contours {
            let verdict = self.classifier.classify(contour);
            if verdict.is_target() {
                target_shaped_contours += 1;
                target_bounds = target_bounds.or_else(|| contour.bounding_box());
            } else if contour.len() > self.config.min_points {
                log::debug!("Rejected large contour: {:?}", verdict);
            }
        }

        let metrics = ShapeMetrics {
            strong_edge_pixels: edges.strong_edge_count(threshold),
            contour_count: contours.len(),
            largest_contour: contours.iter().map(Contour::len).max().unwrap_or(0),
            target_shaped_contours,
            target_bounds,
            target_detected: target_shaped_contours > 0,
        };

        log::debug!(
            "Shape: {} contours, largest {} points, {} target-shaped",
            metrics.contour_count,
            metrics.largest_contour,
            metrics.target_shaped_contours
        );
        metrics
    }
}
