//! Text backend built on cosmic-text, as re-exported by glyphon.
//!
//! Glyphs are rasterized on the CPU by swash and composited onto a tiny-skia
//! pixmap one coverage rectangle at a time.

use glyphon::{
  Attrs,
  Buffer,
  Family,
  FontSystem,
  Metrics,
  Shaping,
  Style,
  SwashCache,
  Weight,
  Wrap,
};
use tiny_skia::{
  Paint,
  Pixmap,
  Rect,
  Transform,
};

use crate::{
  Color,
  style::FontStyle,
  text::{
    FontSpec,
    TextBackend,
    TextExtent,
    TextMeasure,
  },
};

/// Line height as a multiple of font size
const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub struct GlyphonBackend {
  font_system: FontSystem,
  swash_cache: SwashCache,
}

impl GlyphonBackend {
  /// Backend over the system's installed fonts.
  pub fn new() -> Self {
    Self::with_font_system(FontSystem::new())
  }

  /// Backend over a caller-provided font database.
  pub fn with_fonts(db: glyphon::fontdb::Database) -> Self {
    Self::with_font_system(FontSystem::new_with_locale_and_db("en-US".into(), db))
  }

  pub fn with_font_system(font_system: FontSystem) -> Self {
    Self {
      font_system,
      swash_cache: SwashCache::new(),
    }
  }

  fn shape(&mut self, font: &FontSpec, text: &str) -> Buffer {
    let metrics = Metrics::new(font.size, font.size * LINE_HEIGHT_FACTOR);
    let mut buffer = Buffer::new(&mut self.font_system, metrics);
    buffer.set_wrap(&mut self.font_system, Wrap::None);
    buffer.set_size(&mut self.font_system, None, None);

    let attrs = attrs_for(font);
    buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
    buffer.shape_until_scroll(&mut self.font_system, false);
    buffer
  }
}

impl Default for GlyphonBackend {
  fn default() -> Self {
    Self::new()
  }
}

fn attrs_for(font: &FontSpec) -> Attrs<'_> {
  let weight = if font.style.contains(FontStyle::BOLD) {
    Weight::BOLD
  } else {
    Weight::NORMAL
  };
  let style = if font.style.contains(FontStyle::ITALIC) {
    Style::Italic
  } else {
    Style::Normal
  };

  Attrs::new()
    .family(Family::Name(&font.family))
    .weight(weight)
    .style(style)
}

fn extent_of(buffer: &Buffer) -> TextExtent {
  let mut extent = TextExtent {
    width:  0.0,
    height: buffer.metrics().line_height,
  };
  for run in buffer.layout_runs() {
    extent.width = extent.width.max(run.line_w);
    extent.height = extent.height.max(run.line_top + run.line_height);
  }
  extent
}

fn fill(canvas: &mut Pixmap, x: f32, y: f32, width: f32, height: f32, rgba: [u8; 4]) {
  if width <= 0.0 || height <= 0.0 {
    return;
  }
  let Some(rect) = Rect::from_xywh(x, y, width, height) else {
    return;
  };

  let mut paint = Paint::default();
  paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
  paint.anti_alias = false;
  canvas.fill_rect(rect, &paint, Transform::identity(), None);
}

impl TextMeasure for GlyphonBackend {
  fn measure(&mut self, font: &FontSpec, text: &str) -> TextExtent {
    let buffer = self.shape(font, text);
    extent_of(&buffer)
  }
}

impl TextBackend for GlyphonBackend {
  fn draw(&mut self, canvas: &mut Pixmap, font: &FontSpec, text: &str, x: f32, y: f32, color: Color) {
    let buffer = self.shape(font, text);
    let [r, g, b, a] = color.to_rgba8();
    let ink = glyphon::Color::rgba(r, g, b, a);

    let (left, top) = (x.round() as i32, y.round() as i32);
    buffer.draw(
      &mut self.font_system,
      &mut self.swash_cache,
      ink,
      |gx, gy, width, height, coverage| {
        if coverage.a() == 0 {
          return;
        }
        fill(
          canvas,
          (left + gx) as f32,
          (top + gy) as f32,
          width as f32,
          height as f32,
          [coverage.r(), coverage.g(), coverage.b(), coverage.a()],
        );
      },
    );

    // cosmic-text shapes glyphs only; decorations are drawn as rules.
    let thickness = (font.size / 14.0).max(1.0);
    let rgba = color.to_rgba8();
    for run in buffer.layout_runs() {
      let baseline = top as f32 + run.line_y;
      if font.style.contains(FontStyle::UNDERLINE) {
        fill(canvas, left as f32, baseline + thickness, run.line_w, thickness, rgba);
      }
      if font.style.contains(FontStyle::STRIKETHROUGH) {
        fill(canvas, left as f32, baseline - font.size * 0.3, run.line_w, thickness, rgba);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_attrs_follow_style_flags() {
    let font = FontSpec::new("Georgia", 12.0, FontStyle::BOLD | FontStyle::ITALIC);
    let attrs = attrs_for(&font);
    assert_eq!(attrs.weight, Weight::BOLD);
    assert_eq!(attrs.style, Style::Italic);
    assert_eq!(attrs.family, Family::Name("Georgia"));

    let plain = FontSpec::new("Georgia", 12.0, FontStyle::UNDERLINE);
    let attrs = attrs_for(&plain);
    assert_eq!(attrs.weight, Weight::NORMAL);
    assert_eq!(attrs.style, Style::Normal);
  }

  #[test]
  fn test_fill_ignores_empty_rects() {
    let mut canvas = Pixmap::new(4, 4).unwrap();
    fill(&mut canvas, 1.0, 1.0, 0.0, 2.0, [0, 0, 0, 255]);
    fill(&mut canvas, 1.0, 1.0, 2.0, 0.0, [0, 0, 0, 255]);
    fill(&mut canvas, 1.0, 1.0, -2.0, 2.0, [0, 0, 0, 255]);
    assert!(canvas.pixels().iter().all(|pixel| pixel.alpha() == 0));

    fill(&mut canvas, 1.0, 1.0, 2.0, 2.0, [0, 0, 0, 255]);
    assert_eq!(canvas.pixels().iter().filter(|pixel| pixel.alpha() == 255).count(), 4);
  }

  #[test]
  #[ignore = "needs installed system fonts"]
  fn test_system_fonts_measure_sample() {
    let mut backend = GlyphonBackend::new();
    let font = FontSpec::new("Tahoma", 16.0, FontStyle::empty());
    let short = backend.measure(&font, "Aa");
    let long = backend.measure(&font, "AaBbCc123");
    assert!(long.width > short.width);
    assert!(short.height >= 16.0);
  }
}
