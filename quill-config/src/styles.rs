use quill_renderer::{
  Color,
  FontStyle,
  StyleCatalog,
  StyleDefinition,
};
use serde::Deserialize;

use crate::error::{
  ConfigError,
  Result,
};

/// A style as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StyleRaw {
  name:       String,
  #[serde(default = "default_font")]
  font:       String,
  #[serde(default = "default_size")]
  size:       f32,
  #[serde(default)]
  font_style: Vec<String>,
  color:      Option<String>,
  background: Option<String>,
}

fn default_font() -> String {
  "Calibri".into()
}

fn default_size() -> f32 {
  11.0
}

impl StyleRaw {
  fn resolve(self) -> Result<StyleDefinition> {
    if !(self.size > 0.0) {
      return Err(ConfigError::InvalidSize {
        style: self.name,
        size:  self.size,
      });
    }

    let mut font_style = FontStyle::empty();
    for flag in &self.font_style {
      font_style |= FontStyle::parse_flag(flag).ok_or_else(|| {
        ConfigError::InvalidFontStyle {
          style: self.name.clone(),
          value: flag.clone(),
        }
      })?;
    }

    let parse_color = |value: &str| {
      Color::parse(value).ok_or_else(|| {
        ConfigError::InvalidColor {
          style: self.name.clone(),
          value: value.to_string(),
        }
      })
    };
    let foreground = self
      .color
      .as_deref()
      .map(parse_color)
      .transpose()?
      .unwrap_or(Color::BLACK);
    let background = self.background.as_deref().map(parse_color).transpose()?;

    Ok(StyleDefinition {
      name: self.name,
      font_family: self.font,
      font_size: self.size,
      font_style,
      foreground,
      background,
    })
  }
}

/// The ordered list of styles offered in the gallery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
  styles: Vec<StyleDefinition>,
}

impl StyleSheet {
  pub fn new(styles: Vec<StyleDefinition>) -> Result<Self> {
    for (index, style) in styles.iter().enumerate() {
      if styles[..index].iter().any(|other| other.name == style.name) {
        return Err(ConfigError::DuplicateStyle(style.name.clone()));
      }
    }
    Ok(Self { styles })
  }

  pub(crate) fn from_raw(raw: Vec<StyleRaw>) -> Result<Self> {
    let styles = raw
      .into_iter()
      .map(StyleRaw::resolve)
      .collect::<Result<Vec<_>>>()?;
    Self::new(styles)
  }

  pub fn len(&self) -> usize {
    self.styles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.styles.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&StyleDefinition> {
    self.styles.get(index)
  }

  pub fn position(&self, name: &str) -> Option<usize> {
    self.styles.iter().position(|style| style.name == name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
    self.styles.iter()
  }
}

impl StyleCatalog for StyleSheet {
  fn count(&self) -> usize {
    self.styles.len()
  }

  fn style(&self, index: usize) -> Option<StyleDefinition> {
    self.styles.get(index).cloned()
  }

  fn name(&self, index: usize) -> Option<String> {
    self.styles.get(index).map(|style| style.name.clone())
  }
}
