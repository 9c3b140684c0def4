//! tonguecam: capture validation for tongue photos
//!
//! Given one decoded RGBA frame, decide whether it is usable for analysis
//! and, if not, say why. The checks run cheapest first and stop at the first
//! failure:
//!
//! 1. Exposure: mean brightness must reach a minimum
//! 2. Sharpness: variance of the Laplacian response must exceed a minimum
//! 3. Color: enough pixels must have a tongue-like red/pink color
//! 4. Shape: Sobel edges must form at least one large, sideways-elongated contour
//!
//! Everything is implemented directly on the pixel buffer; there is no
//! vision library underneath.
//!
//! # Usage
//! ```rust,ignore
//! use tonguecam::{Frame, QualityValidator, ValidationResult};
//!
//! let frame = Frame::decode(&std::fs::read("capture.jpg")?)?;
//! match QualityValidator::default().validate(&frame) {
//!     ValidationResult::Accepted => println!("looks good"),
//!     ValidationResult::Rejected(reason) => println!("{}", reason.message()),
//! }
//! ```
pub mod commands;
pub mod config;
pub mod errors;
pub mod invariant_ppt;
pub mod quality;
pub mod source;
pub mod types;

// Testing utilities - synthetic captures for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::ValidationConfig;
pub use errors::CaptureCheckError;
pub use quality::{
    validate, QualityReport, QualityValidator, RejectionReason, ValidationResult,
    ValidationStage,
};
pub use source::{FrameSource, ImageFileSource, MemorySource};
pub use types::{Frame, Rgba};

/// Initialize logging for the validation pipeline
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "tonguecam=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn test_crate_info() {
        let info = get_info();
        assert_eq!(info.name, "tonguecam");
        assert!(!info.version.is_empty());
        assert!(!info.description.is_empty());
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
