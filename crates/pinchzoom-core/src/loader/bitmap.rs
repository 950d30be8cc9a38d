use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use image::{ImageReader, Limits, RgbaImage};

use crate::consts::MIN_DECODE_ALLOC;
use crate::error::LoadError;
use crate::geometry::NaturalSize;

/// Decoded RGBA8 image shared between the loader and its consumers.
///
/// Cloning shares the pixel buffer; nothing outside the loader mutates it.
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn natural_size(&self) -> NaturalSize {
        NaturalSize::new(self.width() as f32, self.height() as f32)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn ptr_eq(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitmap({}x{})", self.width(), self.height())
    }
}

/// Decode an encoded image (format sniffed from content) into a bitmap.
pub fn decode_bitmap(bytes: &[u8], max_pixels: u64) -> Result<Bitmap, LoadError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::DecodeFailure(e.to_string()))?;

    let mut limits = Limits::default();
    limits.max_alloc = Some(max_pixels.saturating_mul(4).max(MIN_DECODE_ALLOC));
    reader.limits(limits);

    let decoded = reader
        .decode()
        .map_err(|e| LoadError::DecodeFailure(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (w, h) = rgba.dimensions();

    if w == 0 || h == 0 {
        return Err(LoadError::DecodeFailure(format!(
            "image has zero dimension: {w}x{h}"
        )));
    }
    if w as u64 * h as u64 > max_pixels {
        return Err(LoadError::DecodeFailure(format!(
            "image too large: {w}x{h} (max {max_pixels} pixels)"
        )));
    }

    Ok(Bitmap::new(rgba))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bitmap = decode_bitmap(&png_bytes(6, 4), 1_000_000).unwrap();
        assert_eq!(bitmap.natural_size(), NaturalSize::new(6.0, 4.0));
        assert_eq!(bitmap.as_raw().len(), 6 * 4 * 4);
    }

    #[test]
    fn test_decode_rejects_oversize() {
        let err = decode_bitmap(&png_bytes(20, 20), 100).unwrap_err();
        assert!(matches!(err, LoadError::DecodeFailure(_)));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_bitmap(b"definitely not an image", 1_000).unwrap_err();
        assert!(matches!(err, LoadError::DecodeFailure(_)));
    }
}
