use thiserror::Error;

/// Errors raised around the validation pipeline.
///
/// Rejections (too dark, too blurry, no target) are *not* errors; they are
/// returned as [`crate::quality::ValidationResult`]. These variants cover
/// malformed input and the I/O boundary only.
#[derive(Debug, Error)]
pub enum CaptureCheckError {
    #[error("Invalid frame: {width}x{height} RGBA needs {expected} bytes, got {len}")]
    InvalidFrame {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },

    #[error("Invalid frame: dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for CaptureCheckError {
    fn from(err: image::ImageError) -> Self {
        CaptureCheckError::Decode(err.to_string())
    }
}
