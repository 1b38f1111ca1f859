use std::rc::Rc;

use quill_renderer::{
  ImageStream,
  StyleCatalog,
  TileRenderer,
};

use super::logged;
use crate::{
  error::{
    CommandError,
    Result,
  },
  registry::{
    Command,
    CommandKind,
    Instance,
  },
  session::Session,
};

pub struct GalleryTileCommand {
  session: Rc<Session>,
  catalog: Rc<dyn StyleCatalog>,
}

impl Command for GalleryTileCommand {
  const KIND: CommandKind = CommandKind::GalleryTile;

  fn construct(session: &Rc<Session>) -> Result<Self> {
    let catalog = session
      .catalog()
      .ok_or(CommandError::MissingResource("style catalog"))?;
    Ok(Self {
      session: session.clone(),
      catalog,
    })
  }

  fn upcast(command: Rc<Self>) -> Instance {
    Instance::GalleryTile(command)
  }

  fn downcast(instance: &Instance) -> Option<Rc<Self>> {
    match instance {
      Instance::GalleryTile(command) => Some(command.clone()),
      _ => None,
    }
  }
}

impl GalleryTileCommand {
  pub fn catalog(&self) -> &dyn StyleCatalog {
    self.catalog.as_ref()
  }

  /// Render the gallery tile for the style at `index`.
  ///
  /// Every call draws from scratch with a new text backend.
  pub fn make_tile(&self, control_id: &str, index: usize) -> Result<ImageStream> {
    log::info!(target: self.session.logger().target(), "MakeTile({control_id}, {index})");

    logged(&self.session, "MakeTile", || {
      let options = self.session.config().settings.tile.options();
      let mut renderer = TileRenderer::with_backend(self.session.text_backend(), options);
      Ok(renderer.render_tile(self.catalog.as_ref(), index)?)
    })
  }
}
