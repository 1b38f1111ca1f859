//! Color types and utilities

/// RGBA color representation using normalized floats (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
  /// Red component (0.0 to 1.0)
  pub r: f32,
  /// Green component (0.0 to 1.0)
  pub g: f32,
  /// Blue component (0.0 to 1.0)
  pub b: f32,
  /// Alpha component (0.0 = transparent, 1.0 = opaque)
  pub a: f32,
}

impl Color {
  /// Create a new color with RGBA components
  ///
  /// Components should be in the range 0.0 to 1.0
  pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Create a color from a hex value
  ///
  /// # Example
  ///
  /// ```rust
  /// # use quill_renderer::Color;
  /// let red = Color::from_hex(0xFF0000);
  /// assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
  /// ```
  pub fn from_hex(hex: u32) -> Self {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    Self { r, g, b, a: 1.0 }
  }

  /// Parse `#RRGGBB`, `#AARRGGBB` or the word `transparent`.
  pub fn parse(text: &str) -> Option<Self> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("transparent") {
      return Some(Self::TRANSPARENT);
    }

    let digits = text.strip_prefix('#')?;
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
      6 => Some(Self::from_hex(value)),
      8 => {
        let alpha = ((value >> 24) & 0xFF) as f32 / 255.0;
        Some(Self {
          a: alpha,
          ..Self::from_hex(value & 0x00FF_FFFF)
        })
      },
      _ => None,
    }
  }

  pub fn is_transparent(&self) -> bool {
    self.a <= 0.0
  }

  pub fn to_rgba8(self) -> [u8; 4] {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
  }

  /// `#rrggbb`, alpha dropped.
  pub fn to_css_hex(self) -> String {
    let [r, g, b, _] = self.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
  }

  pub fn to_skia(self) -> tiny_skia::Color {
    let [r, g, b, a] = self.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
  }

  // Common colors
  //

  pub const WHITE: Self = Self {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
  };

  pub const BLACK: Self = Self {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
  };

  pub const TRANSPARENT: Self = Self {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
  };
}
