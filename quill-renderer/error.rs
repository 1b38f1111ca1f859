use thiserror::Error;

/// Errors that can occur while rendering a tile
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
  /// The caller asked for a style the catalog does not have
  #[error("style index {index} is out of range (catalog has {count} styles)")]
  StyleOutOfRange { index: usize, count: usize },

  /// Unable to allocate the drawing surface
  #[error("Failed to create canvas of {width}x{height}")]
  Canvas { width: u32, height: u32 },

  /// PNG encoding failure
  #[error("Failed to encode tile: {0}")]
  Encode(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
