//! Pixel buffer types shared by every analyzer.

use crate::errors::CaptureCheckError;
use serde::{Deserialize, Serialize};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// One RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(level: u8) -> Self {
        Self::opaque(level, level, level)
    }

    #[inline]
    fn from_slice(px: &[u8]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }

    /// Unweighted channel mean `(R + G + B) / 3`, alpha ignored.
    #[inline]
    pub fn channel_mean(&self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }

    /// ITU-R BT.601 luma `0.299R + 0.587G + 0.114B`.
    #[inline]
    pub fn luminance(&self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }
}

/// A decoded capture: `width * height` RGBA8 pixels, row-major.
///
/// The size invariant is checked once in [`Frame::new`]; afterwards the
/// frame is immutable and every analyzer only borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CaptureCheckError> {
        if width == 0 || height == 0 {
            return Err(CaptureCheckError::ZeroDimension { width, height });
        }

        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(CaptureCheckError::InvalidFrame {
                width,
                height,
                len: data.len(),
                expected,
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, CaptureCheckError>
    where
        F: FnMut(u32, u32) -> Rgba,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let px = f(x, y);
                data.extend_from_slice(&[px.r, px.g, px.b, px.a]);
            }
        }
        Self::new(width, height, data)
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, CaptureCheckError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Decode an encoded still (JPEG, PNG, ...) into a frame.
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureCheckError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_rgba_image(img.to_rgba8())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bounds-checked pixel access.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some(Rgba::from_slice(&self.data[idx..idx + CHANNELS]))
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data.chunks_exact(CHANNELS).map(Rgba::from_slice)
    }

    /// New frame with every pixel passed through `f`.
    pub fn map_pixels<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Rgba) -> Rgba,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.pixels() {
            let out = f(px);
            data.extend_from_slice(&[out.r, out.g, out.b, out.a]);
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// True when the size invariant holds. Always true for frames built
    /// through the constructors; analyzers assert it anyway.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == self.width as usize * self.height as usize * CHANNELS
    }
}

impl TryFrom<image::RgbaImage> for Frame {
    type Error = CaptureCheckError;

    fn try_from(img: image::RgbaImage) -> Result<Self, Self::Error> {
        Frame::from_rgba_image(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rejects_short_buffer() {
        let err = Frame::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            CaptureCheckError::InvalidFrame {
                len: 15,
                expected: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_frame_rejects_zero_dimension() {
        assert!(matches!(
            Frame::new(0, 4, vec![]),
            Err(CaptureCheckError::ZeroDimension { .. })
        ));
        assert!(matches!(
            Frame::new(4, 0, vec![]),
            Err(CaptureCheckError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_pixel_access_is_bounds_checked() {
        let frame = Frame::from_fn(3, 2, |x, y| Rgba::opaque(x as u8, y as u8, 7)).unwrap();
        assert_eq!(frame.pixel(2, 1), Some(Rgba::opaque(2, 1, 7)));
        assert_eq!(frame.pixel(3, 0), None);
        assert_eq!(frame.pixel(0, 2), None);
        assert_eq!(frame.pixels().count(), 6);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_luminance_weights() {
        let white = Rgba::gray(255);
        assert!((white.luminance() - 255.0).abs() < 1e-3);
        assert!((Rgba::opaque(255, 0, 0).luminance() - 76.245).abs() < 1e-3);
        assert_eq!(Rgba::opaque(30, 60, 90).channel_mean(), 60.0);
    }

    #[test]
    fn test_from_rgba_image() {
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let frame = Frame::try_from(img).unwrap();
        assert_eq!((frame.width(), frame.height()), (4, 3));
        assert_eq!(frame.pixel(3, 2), Some(Rgba::opaque(10, 20, 30)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            Frame::decode(b"definitely not an image"),
            Err(CaptureCheckError::Decode(_))
        ));
    }
}
