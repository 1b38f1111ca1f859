//! Lazily built, reused command instances.

use std::{
  cell::RefCell,
  collections::BTreeMap,
  rc::Rc,
};

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
  session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandKind {
  ToCase,
  GalleryTile,
  InsertLine,
  ApplyStyle,
}

impl CommandKind {
  pub const ALL: [Self; 4] = [
    Self::ToCase,
    Self::GalleryTile,
    Self::InsertLine,
    Self::ApplyStyle,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::ToCase => "to_case",
      Self::GalleryTile => "gallery_tile",
      Self::InsertLine => "insert_line",
      Self::ApplyStyle => "apply_style",
    }
  }
}

/// A constructed command, stored per kind.
#[derive(Clone)]
pub enum Instance {
  ToCase(Rc<ToCaseCommand>),
  GalleryTile(Rc<GalleryTileCommand>),
  InsertLine(Rc<InsertLineCommand>),
  ApplyStyle(Rc<ApplyStyleCommand>),
}

impl Instance {
  pub fn kind(&self) -> CommandKind {
    match self {
      Self::ToCase(_) => CommandKind::ToCase,
      Self::GalleryTile(_) => CommandKind::GalleryTile,
      Self::InsertLine(_) => CommandKind::InsertLine,
      Self::ApplyStyle(_) => CommandKind::ApplyStyle,
    }
  }
}

/// A command the registry can build from a session.
pub trait Command: Sized + 'static {
  const KIND: CommandKind;

  /// Build the command, failing when the session lacks a dependency.
  fn construct(session: &Rc<Session>) -> Result<Self>;

  fn upcast(command: Rc<Self>) -> Instance;
  fn downcast(instance: &Instance) -> Option<Rc<Self>>;
}

/// Read-only state predicates the ribbon polls.
pub trait ContextQuery {
  fn query_context(&self) -> bool;
}

/// Hands out one instance per command kind, built on first request from the
/// registry's session.
pub struct CommandRegistry {
  session: Rc<Session>,
  slots:   RefCell<BTreeMap<CommandKind, Instance>>,
  /// Kinds whose construction failed, with the reason.
  failed:  RefCell<BTreeMap<CommandKind, String>>,
}

impl CommandRegistry {
  pub fn new(session: Rc<Session>) -> Self {
    Self {
      session,
      slots: RefCell::new(BTreeMap::new()),
      failed: RefCell::new(BTreeMap::new()),
    }
  }

  pub fn session(&self) -> &Rc<Session> {
    &self.session
  }

  /// The instance of `T`, constructing it on first use.
  ///
  /// A construction failure is logged and returned once. The session never
  /// changes, so the kind is not built again; later calls get
  /// [`CommandError::Unavailable`] until [`CommandRegistry::release`].
  pub fn get<T: Command>(&self) -> Result<Rc<T>> {
    if let Some(command) = self.slots.borrow().get(&T::KIND).and_then(T::downcast) {
      return Ok(command);
    }
    if let Some(reason) = self.failed.borrow().get(&T::KIND) {
      return Err(CommandError::Unavailable {
        command: T::KIND.name(),
        reason:  reason.clone(),
      });
    }

    let command = match T::construct(&self.session) {
      Ok(command) => Rc::new(command),
      Err(err) => {
        log::error!(
          target: self.session.logger().target(),
          "cannot construct {}: {err}",
          T::KIND.name()
        );
        self.failed.borrow_mut().insert(T::KIND, err.to_string());
        return Err(err);
      },
    };

    log::debug!(target: self.session.logger().target(), "constructed {}", T::KIND.name());
    self
      .slots
      .borrow_mut()
      .insert(T::KIND, T::upcast(command.clone()));
    Ok(command)
  }

  pub fn contains(&self, kind: CommandKind) -> bool {
    self.slots.borrow().contains_key(&kind)
  }

  /// Kinds constructed so far, in kind order.
  pub fn constructed(&self) -> Vec<CommandKind> {
    self.slots.borrow().keys().copied().collect()
  }

  /// Kinds whose construction failed.
  pub fn failed(&self) -> Vec<CommandKind> {
    self.failed.borrow().keys().copied().collect()
  }

  /// Drop every instance and failure; the next `get` builds afresh.
  pub fn release(&self) -> usize {
    self.failed.borrow_mut().clear();
    let mut slots = self.slots.borrow_mut();
    let count = slots.len();
    slots.clear();
    count
  }
}
