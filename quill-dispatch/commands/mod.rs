mod apply_style;
mod gallery_tile;
mod insert_line;
mod to_case;

pub use apply_style::{
  ApplyStyleCommand,
  inline_css,
};
pub use gallery_tile::GalleryTileCommand;
pub use insert_line::InsertLineCommand;
pub use to_case::ToCaseCommand;

use crate::{
  error::Result,
  session::Session,
};

/// Run one command body, logging a failure under the session's target
/// before handing it back.
fn logged<T>(session: &Session, name: &str, run: impl FnOnce() -> Result<T>) -> Result<T> {
  run().inspect_err(|err| {
    log::error!(target: session.logger().target(), "{name} failed: {err}");
  })
}
