//! Named text styles shown in the style gallery.

use bitflags::bitflags;

use crate::Color;

bitflags! {
  /// Font decorations a style can carry.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct FontStyle: u8 {
    const BOLD          = 1 << 0;
    const ITALIC        = 1 << 1;
    const UNDERLINE     = 1 << 2;
    const STRIKETHROUGH = 1 << 3;
  }
}

impl FontStyle {
  /// Parse a single flag name such as `"bold"`.
  pub fn parse_flag(name: &str) -> Option<Self> {
    match name.trim().to_ascii_lowercase().as_str() {
      "bold" => Some(Self::BOLD),
      "italic" => Some(Self::ITALIC),
      "underline" => Some(Self::UNDERLINE),
      "strikethrough" | "strikeout" => Some(Self::STRIKETHROUGH),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefinition {
  pub name:        String,
  pub font_family: String,
  /// Size in points.
  pub font_size:   f32,
  pub font_style:  FontStyle,
  pub foreground:  Color,
  /// `None` or a transparent color means no fill behind the sample text.
  pub background:  Option<Color>,
}

impl StyleDefinition {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:        name.into(),
      font_family: "Calibri".into(),
      font_size:   11.0,
      font_style:  FontStyle::empty(),
      foreground:  Color::BLACK,
      background:  None,
    }
  }

  pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
    self.font_family = family.into();
    self.font_size = size;
    self
  }

  pub fn with_style(mut self, style: FontStyle) -> Self {
    self.font_style = style;
    self
  }

  pub fn with_foreground(mut self, color: Color) -> Self {
    self.foreground = color;
    self
  }

  pub fn with_background(mut self, color: Color) -> Self {
    self.background = Some(color);
    self
  }

  /// The background fill, if it would paint anything.
  pub fn fill(&self) -> Option<Color> {
    self.background.filter(|color| !color.is_transparent())
  }
}

/// An ordered, read-only list of named styles.
pub trait StyleCatalog {
  fn count(&self) -> usize;
  fn style(&self, index: usize) -> Option<StyleDefinition>;

  fn name(&self, index: usize) -> Option<String> {
    self.style(index).map(|style| style.name)
  }
}

impl StyleCatalog for [StyleDefinition] {
  fn count(&self) -> usize {
    self.len()
  }

  fn style(&self, index: usize) -> Option<StyleDefinition> {
    self.get(index).cloned()
  }
}

impl StyleCatalog for Vec<StyleDefinition> {
  fn count(&self) -> usize {
    self.len()
  }

  fn style(&self, index: usize) -> Option<StyleDefinition> {
    self.get(index).cloned()
  }
}
