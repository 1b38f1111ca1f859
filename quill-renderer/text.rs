//! Text measuring and drawing seams
//!
//! Layout only needs [`TextMeasure`]; painting goes through [`TextBackend`].
//! Keeping the two apart lets tile layout run without any fonts installed.

use tiny_skia::Pixmap;

use crate::{
  Color,
  style::FontStyle,
};

/// Typographic points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert a size in points to pixels at the given vertical DPI.
pub fn points_to_pixels(points: f32, dpi_y: f32) -> f32 {
  points * dpi_y / POINTS_PER_INCH
}

/// A resolved font request
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
  pub family: String,
  /// Font size in pixels
  pub size:   f32,
  pub style:  FontStyle,
}

impl FontSpec {
  pub fn new(family: impl Into<String>, size: f32, style: FontStyle) -> Self {
    Self {
      family: family.into(),
      size,
      style,
    }
  }

  pub fn from_points(family: impl Into<String>, points: f32, style: FontStyle, dpi_y: f32) -> Self {
    Self::new(family, points_to_pixels(points, dpi_y), style)
  }
}

/// Measured size of a single line of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
  pub width:  f32,
  pub height: f32,
}

pub trait TextMeasure {
  fn measure(&mut self, font: &FontSpec, text: &str) -> TextExtent;
}

pub trait TextBackend: TextMeasure {
  /// Draw `text` with its top-left corner at `(x, y)`.
  fn draw(&mut self, canvas: &mut Pixmap, font: &FontSpec, text: &str, x: f32, y: f32, color: Color);
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
  fn measure(&mut self, font: &FontSpec, text: &str) -> TextExtent {
    (**self).measure(font, text)
  }
}

impl<T: TextBackend + ?Sized> TextBackend for Box<T> {
  fn draw(&mut self, canvas: &mut Pixmap, font: &FontSpec, text: &str, x: f32, y: f32, color: Color) {
    (**self).draw(canvas, font, text, x, y, color)
  }
}
