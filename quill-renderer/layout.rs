//! Tile geometry
//!
//! A tile is a 70x60 preview: the sample string in the style's own font near
//! the top, and the style's name underneath in a small fixed label font. All
//! positions are computed here from measurements alone, so the result is the
//! same for every call with the same inputs.

use unicode_segmentation::UnicodeSegmentation;

use crate::{
  Color,
  style::{
    FontStyle,
    StyleDefinition,
  },
  text::{
    FontSpec,
    TextExtent,
    TextMeasure,
  },
};

pub const TILE_WIDTH: u32 = 70;
pub const TILE_HEIGHT: u32 = 60;

pub const SAMPLE_TEXT: &str = "AaBbCc123";
pub const SAMPLE_Y: f32 = 5.0;
pub const LABEL_Y: f32 = 40.0;

/// Label size in points at the reference DPI.
pub const LABEL_POINTS: f32 = 8.0;
pub const REFERENCE_DPI: f32 = 96.0;

pub const ELLIPSIS: &str = "...";
/// Truncation never cuts a name below this many graphemes.
pub const MIN_LABEL_GRAPHEMES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TileOptions {
  pub dpi_y:        f32,
  pub label_family: String,
}

impl Default for TileOptions {
  fn default() -> Self {
    Self {
      dpi_y:        REFERENCE_DPI,
      label_family: "Tahoma".into(),
    }
  }
}

impl TileOptions {
  /// Label size in points, scaled so it stays the same pixel size at any DPI.
  pub fn label_points(&self) -> f32 {
    LABEL_POINTS * (REFERENCE_DPI / self.dpi_y)
  }
}

/// Horizontal offset that centers `width` on a `canvas` wide surface.
///
/// Content at least as wide as the canvas is pinned to the left edge.
pub fn center_offset(width: f32, canvas: f32) -> f32 {
  if width >= canvas {
    0.0
  } else {
    (canvas - width) / 2.0
  }
}

/// Shorten `name` with a trailing ellipsis until it fits in `max_width`.
///
/// Returns the label and its measured width. Names that already fit come back
/// unchanged; otherwise graphemes are dropped from the end, never going below
/// [`MIN_LABEL_GRAPHEMES`], even when the result still overflows.
pub fn truncate_label<F>(name: &str, max_width: f32, mut measure: F) -> (String, f32)
where
  F: FnMut(&str) -> f32,
{
  let width = measure(name);
  if width <= max_width {
    return (name.to_string(), width);
  }

  let mut graphemes: Vec<&str> = name.graphemes(true).collect();
  if graphemes.len() > MIN_LABEL_GRAPHEMES {
    graphemes.pop();
  }

  let mut label = format!("{}{ELLIPSIS}", graphemes.concat());
  let mut width = measure(&label);
  while width > max_width && graphemes.len() > MIN_LABEL_GRAPHEMES {
    graphemes.pop();
    label = format!("{}{ELLIPSIS}", graphemes.concat());
    width = measure(&label);
  }

  (label, width)
}

/// One line of text placed on the tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
  pub text:   String,
  pub font:   FontSpec,
  pub color:  Color,
  pub x:      f32,
  pub y:      f32,
  pub extent: TextExtent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayout {
  pub sample:     TextPlacement,
  /// Fill drawn behind the sample text over its measured extent.
  pub background: Option<Color>,
  pub label:      TextPlacement,
}

impl TileLayout {
  pub fn compute<M>(style: &StyleDefinition, options: &TileOptions, measure: &mut M) -> Self
  where
    M: TextMeasure + ?Sized,
  {
    let canvas = TILE_WIDTH as f32;

    let font = FontSpec::from_points(
      style.font_family.as_str(),
      style.font_size,
      style.font_style,
      options.dpi_y,
    );
    let extent = measure.measure(&font, SAMPLE_TEXT);
    let sample = TextPlacement {
      text: SAMPLE_TEXT.to_string(),
      x: center_offset(extent.width, canvas),
      y: SAMPLE_Y,
      color: style.foreground,
      font,
      extent,
    };

    let label_font = FontSpec::from_points(
      options.label_family.as_str(),
      options.label_points(),
      FontStyle::empty(),
      options.dpi_y,
    );
    let (text, _) = truncate_label(&style.name, canvas, |text| {
      measure.measure(&label_font, text).width
    });
    // A label still too wide after truncation is centered anyway and clipped
    // on both sides.
    let extent = measure.measure(&label_font, &text);
    let label = TextPlacement {
      x: (canvas - extent.width) / 2.0,
      y: LABEL_Y,
      color: Color::BLACK,
      font: label_font,
      text,
      extent,
    };

    Self {
      sample,
      background: style.fill(),
      label,
    }
  }
}

#[cfg(test)]
mod tests {
  use quickcheck::quickcheck;

  use super::*;

  /// Every grapheme is half the font size wide.
  struct HalfEm;

  impl TextMeasure for HalfEm {
    fn measure(&mut self, font: &FontSpec, text: &str) -> TextExtent {
      TextExtent {
        width:  text.graphemes(true).count() as f32 * font.size * 0.5,
        height: font.size * 1.2,
      }
    }
  }

  /// Every grapheme is twice the font size wide.
  struct Wide;

  impl TextMeasure for Wide {
    fn measure(&mut self, font: &FontSpec, text: &str) -> TextExtent {
      TextExtent {
        width:  text.graphemes(true).count() as f32 * font.size * 2.0,
        height: font.size,
      }
    }
  }

  fn width_of(text: &str) -> f32 {
    text.graphemes(true).count() as f32 * 5.0
  }

  #[test]
  fn test_center_offset() {
    assert_eq!(center_offset(30.0, 70.0), 20.0);
    assert_eq!(center_offset(70.0, 70.0), 0.0);
    assert_eq!(center_offset(95.5, 70.0), 0.0);
    assert_eq!(center_offset(0.0, 70.0), 35.0);
  }

  #[test]
  fn test_short_name_is_untouched() {
    assert_eq!(truncate_label("Normal", 70.0, width_of), ("Normal".into(), 30.0));
  }

  #[test]
  fn test_long_name_is_truncated_to_fit() {
    let (label, width) = truncate_label("Very Long Style Name Example", 70.0, width_of);
    assert_eq!(label, "Very Long S...");
    assert_eq!(width, 70.0);
  }

  #[test]
  fn test_truncation_stops_at_floor() {
    let (label, width) = truncate_label("Heading", 10.0, width_of);
    assert_eq!(label, "Hea...");
    assert!(width > 10.0);
  }

  #[test]
  fn test_truncation_counts_graphemes() {
    // Each flag is a single grapheme made of two scalar values.
    let (label, _) = truncate_label("🇫🇷🇩🇪🇮🇹🇪🇸🇵🇹", 20.0, width_of);
    assert_eq!(label, "🇫🇷🇩🇪🇮🇹...");
  }

  #[test]
  fn test_label_size_tracks_dpi() {
    let options = TileOptions {
      dpi_y: 144.0,
      ..TileOptions::default()
    };
    let style = StyleDefinition::new("Normal");
    let layout = TileLayout::compute(&style, &options, &mut HalfEm);

    assert!((options.label_points() - 16.0 / 3.0).abs() < 1e-4);
    // 8pt at 96 DPI is 10.67px, and the label keeps that size at any DPI.
    assert!((layout.label.font.size - 32.0 / 3.0).abs() < 1e-4);
    assert_eq!(layout.label.font.family, "Tahoma");
  }

  #[test]
  fn test_layout_positions() {
    let style = StyleDefinition::new("Code")
      .with_font("Consolas", 9.0)
      .with_background(Color::from_hex(0xEEEEEE));
    let layout = TileLayout::compute(&style, &TileOptions::default(), &mut HalfEm);

    // 9pt = 12px, nine graphemes at 6px each.
    assert_eq!(layout.sample.extent.width, 54.0);
    assert_eq!(layout.sample.x, 8.0);
    assert_eq!(layout.sample.y, SAMPLE_Y);
    assert_eq!(layout.background, Some(Color::from_hex(0xEEEEEE)));
    assert_eq!(layout.label.text, "Code");
    assert_eq!(layout.label.y, LABEL_Y);
    assert_eq!(layout.label.color, Color::BLACK);
  }

  #[test]
  fn test_wide_sample_is_pinned_left() {
    let style = StyleDefinition::new("Title").with_font("Calibri Light", 28.0);
    let layout = TileLayout::compute(&style, &TileOptions::default(), &mut HalfEm);
    assert!(layout.sample.extent.width > TILE_WIDTH as f32);
    assert_eq!(layout.sample.x, 0.0);
  }

  #[test]
  fn test_overflowing_label_is_centered_past_the_edges() {
    let style = StyleDefinition::new("Heading");
    let layout = TileLayout::compute(&style, &TileOptions::default(), &mut Wide);

    // Six graphemes at 2 x 10.67px.
    assert_eq!(layout.label.text, "Hea...");
    assert!((layout.label.extent.width - 128.0).abs() < 1e-3);
    assert!((layout.label.x + 29.0).abs() < 1e-3);
    // The sample overflows too but stays pinned to the left edge.
    assert_eq!(layout.sample.x, 0.0);
  }

  #[test]
  fn test_fitting_label_is_centered() {
    let layout = TileLayout::compute(&StyleDefinition::new("Code"), &TileOptions::default(), &mut HalfEm);
    // Four graphemes at 5.33px.
    assert!((layout.label.x - (70.0 - 64.0 / 3.0) / 2.0).abs() < 1e-3);
  }

  quickcheck! {
    fn truncation_keeps_floor(name: String, max_width: u8) -> bool {
      let (label, _) = truncate_label(&name, max_width as f32, width_of);
      if width_of(&name) <= max_width as f32 {
        return label == name;
      }

      let kept = label.strip_suffix(ELLIPSIS).map(|rest| rest.graphemes(true).count());
      let original = name.graphemes(true).count();
      matches!(kept, Some(kept) if kept >= MIN_LABEL_GRAPHEMES.min(original) && kept <= original)
    }

    fn centering_is_never_negative(width: u16) -> bool {
      let offset = center_offset(width as f32, TILE_WIDTH as f32);
      offset >= 0.0 && offset <= TILE_WIDTH as f32 / 2.0
    }
  }
}
