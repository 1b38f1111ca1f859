//! Host ribbon callbacks.
//!
//! Every callback the host can make lands here. Lookups that can fail fall
//! back to a placeholder so the ribbon still draws; command failures are
//! logged and returned.

use std::rc::Rc;

use quill_config::resources::{
  label_id,
  screentip_id,
};
use quill_renderer::ImageStream;

use crate::{
  commands::{
    ApplyStyleCommand,
    GalleryTileCommand,
    InsertLineCommand,
    ToCaseCommand,
  },
  error::{
    CommandError,
    Result,
  },
  logging::init_logging,
  registry::{
    CommandKind,
    CommandRegistry,
    ContextQuery,
  },
  session::Session,
};

pub const HORIZONTAL_LINE: char = '─';
pub const DOUBLE_HORIZONTAL_LINE: char = '═';

/// Icon shown on the add-in's menu button.
pub const MENU_IMAGE: &str = "Logo";
pub const DOUBLE_LINE_IMAGE: &str = "DoubleLine";

/// What a ribbon button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  ToCase { upper: bool },
  InsertLine(char),
  /// A style gallery selection, by catalog index.
  ApplyStyle(usize),
}

impl Action {
  pub fn from_control_id(control_id: &str) -> Option<Self> {
    match control_id {
      "ToUppercaseCmd" => Some(Self::ToCase { upper: true }),
      "ToLowercaseCmd" => Some(Self::ToCase { upper: false }),
      "InsertHorizontalLineCmd" => Some(Self::InsertLine(HORIZONTAL_LINE)),
      "InsertDoubleHorizontalLineCmd" => Some(Self::InsertLine(DOUBLE_HORIZONTAL_LINE)),
      _ => None,
    }
  }

  pub fn kind(self) -> CommandKind {
    match self {
      Self::ToCase { .. } => CommandKind::ToCase,
      Self::InsertLine(_) => CommandKind::InsertLine,
      Self::ApplyStyle(_) => CommandKind::ApplyStyle,
    }
  }
}

impl CommandKind {
  pub fn from_control_id(control_id: &str) -> Option<Self> {
    Action::from_control_id(control_id).map(Action::kind)
  }
}

/// Result of an invoked button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// Number of runs rewritten.
  Transformed(usize),
  /// Whether a line was inserted.
  Inserted(bool),
  /// Number of runs restyled.
  Styled(usize),
}

pub struct Ribbon {
  registry: CommandRegistry,
}

impl Ribbon {
  pub fn new(session: Rc<Session>) -> Self {
    Self {
      registry: CommandRegistry::new(session),
    }
  }

  pub fn session(&self) -> &Rc<Session> {
    self.registry.session()
  }

  pub fn registry(&self) -> &CommandRegistry {
    &self.registry
  }

  fn target(&self) -> &str {
    self.session().logger().target()
  }

  /// Called once when the host loads the add-in. Returns the process id.
  pub fn connect(&self) -> u32 {
    init_logging(&self.session().config().settings.log.filter);

    let pid = std::process::id();
    log::info!(target: self.target(), "Starting quill, process PID={pid}");
    if let Some(window) = self.session().window() {
      log::debug!(target: self.target(), "host window {:#x}", window.0);
    }
    pid
  }

  fn resource_string(&self, res_id: String) -> String {
    match self.session().config().resources.string(&res_id) {
      Some(text) => text.to_string(),
      None => {
        log::warn!(target: self.target(), "no resource named {res_id}");
        format!("*{res_id}")
      },
    }
  }

  pub fn item_label(&self, control_id: &str) -> String {
    log::debug!(target: self.target(), "GetItemLabel({control_id})");
    self.resource_string(label_id(control_id))
  }

  pub fn item_screentip(&self, control_id: &str) -> String {
    log::debug!(target: self.target(), "GetItemScreentip({control_id})");
    self.resource_string(screentip_id(control_id))
  }

  /// Dynamic menu content; no control provides any.
  pub fn item_content(&self, control_id: &str) -> Option<String> {
    log::debug!(target: self.target(), "GetItemContent({control_id})");
    None
  }

  pub fn item_enabled(&self, control_id: &str) -> bool {
    log::debug!(target: self.target(), "GetItemEnabled({control_id})");
    true
  }

  pub fn item_visible(&self, control_id: &str) -> bool {
    log::debug!(target: self.target(), "GetItemVisible({control_id})");
    true
  }

  /// A named icon. Streams handed out are kept until shutdown.
  pub fn image(&self, name: &str) -> Option<ImageStream> {
    log::debug!(target: self.target(), "GetImage({name})");
    match self.session().config().resources.icon(name) {
      Some(stream) => Some(self.session().trash().track(stream)),
      None => {
        log::error!(target: self.target(), "no image named {name}");
        None
      },
    }
  }

  pub fn menu_image(&self) -> Option<ImageStream> {
    self.image(MENU_IMAGE)
  }

  pub fn double_line_image(&self) -> Option<ImageStream> {
    self.image(DOUBLE_LINE_IMAGE)
  }

  pub fn style_gallery_item_count(&self) -> usize {
    let count = self
      .session()
      .catalog()
      .map_or(0, |catalog| catalog.count());
    log::debug!(target: self.target(), "GetStyleGalleryItemCount() = {count}");
    count
  }

  pub fn style_gallery_item_id(&self, index: usize) -> String {
    format!("style_{index}")
  }

  pub fn style_gallery_item_image(&self, control_id: &str, index: usize) -> Result<ImageStream> {
    self
      .registry
      .get::<GalleryTileCommand>()?
      .make_tile(control_id, index)
  }

  pub fn style_gallery_item_screentip(&self, index: usize) -> String {
    let name = self
      .session()
      .catalog()
      .and_then(|catalog| catalog.name(index));
    match name {
      Some(name) => name,
      None => {
        let id = self.style_gallery_item_id(index);
        log::warn!(target: self.target(), "no style for gallery item {id}");
        format!("*{id}")
      },
    }
  }

  /// Whether body-only menu items should be enabled.
  pub fn ensure_body_context(&self) -> bool {
    self
      .registry
      .get::<InsertLineCommand>()
      .is_ok_and(|command| command.query_context())
  }

  /// Run the command behind a button.
  pub fn invoke(&self, control_id: &str) -> Result<Outcome> {
    let Some(action) = Action::from_control_id(control_id) else {
      log::error!(target: self.target(), "unknown control {control_id}");
      return Err(CommandError::UnknownControl(control_id.to_string()));
    };
    self.run(action)
  }

  /// A style picked from the gallery.
  pub fn apply_style(&self, control_id: &str, selected_id: &str, index: usize) -> Result<Outcome> {
    log::debug!(target: self.target(), "ApplyStyleCmd({control_id}, {selected_id}, {index})");
    self.run(Action::ApplyStyle(index))
  }

  pub fn run(&self, action: Action) -> Result<Outcome> {
    match action {
      Action::ToCase { upper } => {
        let command = self.registry.get::<ToCaseCommand>()?;
        command.execute(upper).map(Outcome::Transformed)
      },
      Action::InsertLine(ch) => {
        let command = self.registry.get::<InsertLineCommand>()?;
        command.execute(ch).map(Outcome::Inserted)
      },
      Action::ApplyStyle(index) => {
        let command = self.registry.get::<ApplyStyleCommand>()?;
        command.execute(index).map(Outcome::Styled)
      },
    }
  }

  /// Release the streams handed to the host and every command instance.
  pub fn shutdown(&self) -> usize {
    let disposed = self.session().shutdown();
    let released = self.registry.release();
    log::debug!(target: self.target(), "released {released} commands");
    disposed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_control_ids() {
    assert_eq!(
      Action::from_control_id("ToUppercaseCmd"),
      Some(Action::ToCase { upper: true })
    );
    assert_eq!(
      Action::from_control_id("InsertDoubleHorizontalLineCmd"),
      Some(Action::InsertLine('═'))
    );
    assert_eq!(
      CommandKind::from_control_id("InsertHorizontalLineCmd"),
      Some(CommandKind::InsertLine)
    );
    assert_eq!(CommandKind::from_control_id("ShowXmlCmd"), None);
    assert_eq!(Action::ApplyStyle(2).kind(), CommandKind::ApplyStyle);
  }
}
