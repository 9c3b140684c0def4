//! Configuration for the validation pipeline
//!
//! Every threshold the analyzers use lives here, grouped per analyzer, so a
//! single check can be exercised in isolation with overridden values.
//! Defaults match the tuned constants of the capture application.

use crate::errors::CaptureCheckError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment prefix for [`ValidationConfig::load_layered`].
pub const ENV_PREFIX: &str = "TONGUECAM";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    pub exposure: ExposureConfig,
    pub sharpness: SharpnessConfig,
    pub color: ColorConfig,
    pub contour: ContourConfig,
}

/// Brightness gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureConfig {
    /// Frames with mean `(R+G+B)/3` below this are too dark
    pub min_brightness: f64,
}

/// Laplacian sharpness gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpnessConfig {
    /// Laplacian response variance must exceed this
    pub min_laplacian_variance: f64,
}

/// Candidate-region color rule and ratio gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Red channel must be strictly above
    pub red_min: u8,
    /// Green channel must be strictly below
    pub green_max: u8,
    /// Blue channel must be strictly below
    pub blue_max: u8,
    /// Minimum fraction of candidate pixels (0.0-1.0)
    pub min_candidate_ratio: f64,
}

/// Edge strength and contour shape rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourConfig {
    /// Sobel magnitude a pixel must exceed to be a strong edge
    pub edge_threshold: f32,
    /// A target contour needs strictly more points than this
    pub min_points: usize,
    /// Exclusive lower bound of bounding-box width / height
    pub min_aspect_ratio: f64,
    /// Exclusive upper bound of bounding-box width / height
    pub max_aspect_ratio: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            min_brightness: 50.0,
        }
    }
}

impl Default for SharpnessConfig {
    fn default() -> Self {
        Self {
            min_laplacian_variance: 50.0,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            red_min: 120,
            green_max: 90,
            blue_max: 100,
            min_candidate_ratio: 0.02,
        }
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 50.0,
            min_points: 200,
            min_aspect_ratio: 1.5,
            max_aspect_ratio: 4.0,
        }
    }
}

impl ValidationConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CaptureCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: ValidationConfig = toml::from_str(&contents).map_err(|e| {
            CaptureCheckError::Config(format!("Failed to parse config file: {}", e))
        })?;
        config.validate().map_err(CaptureCheckError::Config)?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CaptureCheckError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, CaptureCheckError> {
        toml::to_string_pretty(self)
            .map_err(|e| CaptureCheckError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Defaults, overlaid by an optional TOML file, overlaid by
    /// `TONGUECAM__<SECTION>__<KEY>` environment variables.
    pub fn load_layered<P: AsRef<Path>>(path: Option<P>) -> Result<Self, CaptureCheckError> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| CaptureCheckError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            let name = path.as_ref().to_string_lossy().into_owned();
            builder = builder
                .add_source(config::File::new(&name, config::FileFormat::Toml).required(false));
        }

        let config: ValidationConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CaptureCheckError::Config(e.to_string()))?;

        config.validate().map_err(CaptureCheckError::Config)?;
        Ok(config)
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("tonguecam.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.exposure.min_brightness.is_finite()
            || !(0.0..=255.0).contains(&self.exposure.min_brightness)
        {
            return Err("Minimum brightness must be between 0 and 255".to_string());
        }

        if !self.sharpness.min_laplacian_variance.is_finite()
            || self.sharpness.min_laplacian_variance < 0.0
        {
            return Err("Laplacian variance threshold must be a non-negative number".to_string());
        }

        if !(0.0..=1.0).contains(&self.color.min_candidate_ratio) {
            return Err("Candidate ratio must be between 0.0 and 1.0".to_string());
        }

        if !self.contour.edge_threshold.is_finite() || self.contour.edge_threshold < 0.0 {
            return Err("Edge threshold must be a non-negative number".to_string());
        }
        if !self.contour.min_aspect_ratio.is_finite() || !self.contour.max_aspect_ratio.is_finite()
        {
            return Err("Aspect ratio bounds must be finite".to_string());
        }
        if self.contour.min_aspect_ratio < 0.0
            || self.contour.min_aspect_ratio >= self.contour.max_aspect_ratio
        {
            return Err("Aspect ratio bounds must satisfy 0 <= min < max".to_string());
        }

        Ok(())
    }
}
