//! Style preview tiles for the ribbon gallery
//!
//! Each tile is a 70x60 PNG showing a sample string in a style's font and
//! colors, with the style's (possibly truncated) name underneath. Layout is
//! computed from text measurements alone ([`TileLayout`]), then painted
//! through a [`TextBackend`]; the default backend is [`GlyphonBackend`].
//!
//! # Example
//!
//! ```rust,no_run
//! use quill_renderer::{StyleDefinition, TileOptions, TileRenderer};
//!
//! let styles = vec![StyleDefinition::new("Normal"), StyleDefinition::new("Heading 1")];
//! let mut renderer = TileRenderer::new(TileOptions::default());
//! let tile = renderer.render_tile(&styles, 1)?;
//! assert!(!tile.is_empty());
//! # Ok::<(), quill_renderer::RenderError>(())
//! ```

pub mod backend;
pub mod color;
pub mod error;
pub mod image;
pub mod layout;
pub mod stream;
pub mod style;
pub mod text;
pub mod tile;

pub use backend::GlyphonBackend;
pub use color::Color;
pub use error::{
  RenderError,
  Result,
};
pub use layout::{
  TileLayout,
  TileOptions,
};
pub use stream::ImageStream;
pub use style::{
  FontStyle,
  StyleCatalog,
  StyleDefinition,
};
pub use text::{
  FontSpec,
  TextBackend,
  TextExtent,
  TextMeasure,
};
pub use tile::TileRenderer;
