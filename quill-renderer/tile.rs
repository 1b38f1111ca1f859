//! Style gallery tiles.

use tiny_skia::{
  Paint,
  Pixmap,
  Rect,
  Transform,
};

use crate::{
  Color,
  ImageStream,
  backend::GlyphonBackend,
  error::{
    RenderError,
    Result,
  },
  layout::{
    TILE_HEIGHT,
    TILE_WIDTH,
    TileLayout,
    TileOptions,
  },
  style::StyleCatalog,
  text::TextBackend,
};

/// Renders one preview tile per call. Nothing is cached between calls, so
/// rendering the same style twice produces identical images.
pub struct TileRenderer<B> {
  backend: B,
  options: TileOptions,
}

impl TileRenderer<GlyphonBackend> {
  pub fn new(options: TileOptions) -> Self {
    Self::with_backend(GlyphonBackend::new(), options)
  }
}

impl<B: TextBackend> TileRenderer<B> {
  pub fn with_backend(backend: B, options: TileOptions) -> Self {
    Self { backend, options }
  }

  pub fn options(&self) -> &TileOptions {
    &self.options
  }

  /// Lay out the tile for the style at `index`.
  pub fn layout<C>(&mut self, catalog: &C, index: usize) -> Result<TileLayout>
  where
    C: StyleCatalog + ?Sized,
  {
    let count = catalog.count();
    let style = (index < count)
      .then(|| catalog.style(index))
      .flatten()
      .ok_or(RenderError::StyleOutOfRange { index, count })?;

    Ok(TileLayout::compute(&style, &self.options, &mut self.backend))
  }

  /// Paint the tile for the style at `index` onto a fresh canvas.
  pub fn paint<C>(&mut self, catalog: &C, index: usize) -> Result<Pixmap>
  where
    C: StyleCatalog + ?Sized,
  {
    let layout = self.layout(catalog, index)?;

    let mut canvas = Pixmap::new(TILE_WIDTH, TILE_HEIGHT).ok_or(RenderError::Canvas {
      width:  TILE_WIDTH,
      height: TILE_HEIGHT,
    })?;
    canvas.fill(Color::WHITE.to_skia());

    let sample = &layout.sample;
    if let Some(background) = layout.background
      && let Some(rect) =
        Rect::from_xywh(sample.x, sample.y, sample.extent.width, sample.extent.height)
    {
      let mut paint = Paint::default();
      paint.set_color(background.to_skia());
      canvas.fill_rect(rect, &paint, Transform::identity(), None);
    }

    for text in [&layout.sample, &layout.label] {
      self
        .backend
        .draw(&mut canvas, &text.font, &text.text, text.x, text.y, text.color);
    }

    Ok(canvas)
  }

  /// Render the tile for the style at `index` as a PNG stream.
  pub fn render_tile<C>(&mut self, catalog: &C, index: usize) -> Result<ImageStream>
  where
    C: StyleCatalog + ?Sized,
  {
    let canvas = self.paint(catalog, index)?;
    let png = canvas
      .encode_png()
      .map_err(|err| RenderError::Encode(err.to_string()))?;

    log::debug!("rendered tile {index} ({} bytes)", png.len());
    Ok(ImageStream::new(png))
  }
}
