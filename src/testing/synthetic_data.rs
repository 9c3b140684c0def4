//! Synthetic captures for offline testing
//!
//! The presets mimic what the capture screen produces in the common failure
//! and success cases, without needing a camera.

use crate::errors::CaptureCheckError;
use crate::types::{Frame, Rgba};

/// Dark gray levels of the textured background. Their luminance differs by
/// 30, which gives a strong Laplacian response but, as a one-pixel
/// checkerboard, exactly zero Sobel gradient.
pub const BACKGROUND_LEVELS: (u8, u8) = (50, 80);

/// Tongue-like pink/red that satisfies the candidate color rule.
pub const TARGET_COLOR: Rgba = Rgba::opaque(200, 40, 40);

/// Every pixel the same color.
pub fn uniform_frame(width: u32, height: u32, color: Rgba) -> Result<Frame, CaptureCheckError> {
    Frame::from_fn(width, height, |_, _| color)
}

/// Checkerboard with square cells of `cell` pixels.
pub fn checkerboard_frame(
    width: u32,
    height: u32,
    cell: u32,
    even: Rgba,
    odd: Rgba,
) -> Result<Frame, CaptureCheckError> {
    let cell = cell.max(1);
    Frame::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            even
        } else {
            odd
        }
    })
}

/// A `blob_width x blob_height` target-colored rectangle centred on the
/// textured dark background.
///
/// With the blob well inside the frame, the only strong edges are the
/// two-pixel ring around the rectangle, so the frame yields exactly one
/// contour whose extent is `(blob_width + 1) x (blob_height + 1)`.
pub fn target_blob_frame(
    width: u32,
    height: u32,
    blob_width: u32,
    blob_height: u32,
) -> Result<Frame, CaptureCheckError> {
    let x0 = width.saturating_sub(blob_width) / 2;
    let y0 = height.saturating_sub(blob_height) / 2;
    let (dark, light) = BACKGROUND_LEVELS;

    Frame::from_fn(width, height, |x, y| {
        let inside = x >= x0 && x < x0 + blob_width && y >= y0 && y < y0 + blob_height;
        if inside {
            TARGET_COLOR
        } else if (x + y) % 2 == 0 {
            Rgba::gray(dark)
        } else {
            Rgba::gray(light)
        }
    })
}

/// Scale every color channel by `factor`, as an underexposed capture would.
pub fn darken(frame: &Frame, factor: f64) -> Frame {
    let factor = factor.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f64 * factor) as u8;
    frame.map_pixels(|px| Rgba::new(scale(px.r), scale(px.g), scale(px.b), px.a))
}
