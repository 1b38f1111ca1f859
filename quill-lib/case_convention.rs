//! Letter case conversion for run text.
//!
//! Conversion is per character through the full Unicode mappings, so a
//! character may expand (`ß` becomes `SS`). Anything without a case mapping,
//! markup punctuation and no-break spaces included, is copied through.

use crate::Tendril;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
  Upper,
  Lower,
}

impl Case {
  pub fn from_upper(upper: bool) -> Self {
    if upper { Self::Upper } else { Self::Lower }
  }

  /// Append `text` converted to this case onto `buf`.
  pub fn convert_into(self, text: &str, buf: &mut Tendril) {
    match self {
      Self::Upper => buf.extend(text.chars().flat_map(char::to_uppercase)),
      Self::Lower => buf.extend(text.chars().flat_map(char::to_lowercase)),
    }
  }

  pub fn convert(self, text: &str) -> Tendril {
    let mut res = Tendril::new();
    self.convert_into(text, &mut res);
    res
  }

  pub fn apply(self, text: &str) -> String {
    self.convert(text).into()
  }
}
