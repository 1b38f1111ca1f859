use std::rc::Rc;

use quill_lib::{
  store::DocumentStore,
  transform::apply_inline_style,
};
use quill_renderer::{
  FontStyle,
  RenderError,
  StyleCatalog,
  StyleDefinition,
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

/// Applies a style gallery entry to every fully selected run on the page.
pub struct ApplyStyleCommand {
  session: Rc<Session>,
  store:   Rc<dyn DocumentStore>,
  catalog: Rc<dyn StyleCatalog>,
}

impl Command for ApplyStyleCommand {
  const KIND: CommandKind = CommandKind::ApplyStyle;

  fn construct(session: &Rc<Session>) -> Result<Self> {
    let store = session
      .store()
      .ok_or(CommandError::MissingResource("document store"))?;
    let catalog = session
      .catalog()
      .ok_or(CommandError::MissingResource("style catalog"))?;
    Ok(Self {
      session: session.clone(),
      store,
      catalog,
    })
  }

  fn upcast(command: Rc<Self>) -> Instance {
    Instance::ApplyStyle(command)
  }

  fn downcast(instance: &Instance) -> Option<Rc<Self>> {
    match instance {
      Instance::ApplyStyle(command) => Some(command.clone()),
      _ => None,
    }
  }
}

impl ApplyStyleCommand {
  /// Style the selection with catalog entry `index`. Returns the number of
  /// runs restyled. An index outside the catalog fails before the page is
  /// read.
  pub fn execute(&self, index: usize) -> Result<usize> {
    let target = self.session.logger().target();
    log::info!(target: target, "ApplyStyle({index})");

    let count = logged(&self.session, "ApplyStyle", || {
      let style = self
        .catalog
        .style(index)
        .ok_or(RenderError::StyleOutOfRange {
          index,
          count: self.catalog.count(),
        })?;
      let css = inline_css(&style);

      let mut page = self.store.current_document()?;
      let count = apply_inline_style(&mut page, &css)?;
      self.store.update_document(&page)?;
      Ok(count)
    })?;

    log::debug!(target: target, "restyled {count} runs");
    self.session.invalidate_ribbon();
    Ok(count)
  }
}

/// The `style` attribute value a run gets for `style`.
pub fn inline_css(style: &StyleDefinition) -> String {
  let mut css = format!(
    "font-family:{};font-size:{:.1}pt;color:{}",
    style.font_family,
    style.font_size,
    style.foreground.to_css_hex()
  );
  if let Some(background) = style.fill() {
    css.push_str(";background:");
    css.push_str(&background.to_css_hex());
  }
  if style.font_style.contains(FontStyle::BOLD) {
    css.push_str(";font-weight:bold");
  }
  if style.font_style.contains(FontStyle::ITALIC) {
    css.push_str(";font-style:italic");
  }

  let decorations: Vec<&str> = [
    (FontStyle::UNDERLINE, "underline"),
    (FontStyle::STRIKETHROUGH, "line-through"),
  ]
  .into_iter()
  .filter(|(flag, _)| style.font_style.contains(*flag))
  .map(|(_, name)| name)
  .collect();
  if !decorations.is_empty() {
    css.push_str(";text-decoration:");
    css.push_str(&decorations.join(" "));
  }

  css
}
