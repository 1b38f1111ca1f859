//! Icon decoding.
//!
//! Ribbon icons are small raster images (PNG, BMP or ICO). They are decoded
//! once when loaded so broken files are caught before the host asks for them.

use image::GenericImageView;

/// Icons larger than this in either dimension are rejected.
pub const MAX_ICON_DIMENSION: u32 = 256;

/// A decoded image in RGBA order.
#[derive(Clone)]
pub struct DecodedImage {
  /// RGBA pixel data (4 bytes per pixel)
  pub pixels: Vec<u8>,
  /// Width in pixels
  pub width:  u32,
  /// Height in pixels
  pub height: u32,
}

impl DecodedImage {
  pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
    debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
    Self {
      pixels,
      width,
      height,
    }
  }

  /// RGBA value of the pixel at `(x, y)`.
  pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= self.width || y >= self.height {
      return None;
    }
    let offset = ((y * self.width + x) * 4) as usize;
    let mut rgba = [0; 4];
    rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
    Some(rgba)
  }
}

/// Decode any supported raster image from bytes.
///
/// Returns `None` for unreadable data or zero-sized images.
pub fn decode_image(data: &[u8]) -> Option<DecodedImage> {
  let img = image::load_from_memory(data).ok()?;

  let (width, height) = img.dimensions();
  if width == 0 || height == 0 {
    return None;
  }

  let rgba = img.to_rgba8();
  Some(DecodedImage::new(rgba.into_raw(), width, height))
}

/// Decode an icon, rejecting anything too large for a ribbon button.
pub fn decode_icon(data: &[u8]) -> Option<DecodedImage> {
  let decoded = decode_image(data)?;
  if decoded.width > MAX_ICON_DIMENSION || decoded.height > MAX_ICON_DIMENSION {
    log::warn!(
      "icon of {}x{} exceeds {MAX_ICON_DIMENSION}px",
      decoded.width,
      decoded.height
    );
    return None;
  }
  Some(decoded)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn png(width: u32, height: u32) -> Vec<u8> {
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    pixmap.fill(tiny_skia::Color::from_rgba8(10, 20, 30, 255));
    pixmap.encode_png().unwrap()
  }

  #[test]
  fn test_decode_png() {
    let decoded = decode_icon(&png(16, 8)).unwrap();
    assert_eq!((decoded.width, decoded.height), (16, 8));
    assert_eq!(decoded.pixel(15, 7), Some([10, 20, 30, 255]));
    assert_eq!(decoded.pixel(16, 0), None);
  }

  #[test]
  fn test_invalid_data() {
    assert!(decode_image(b"not an image").is_none());
    assert!(decode_image(&[]).is_none());
  }

  #[test]
  fn test_oversized_icon_rejected() {
    let data = png(MAX_ICON_DIMENSION + 1, 1);
    assert!(decode_image(&data).is_some());
    assert!(decode_icon(&data).is_none());
  }
}
