use std::rc::Rc;

use quill_lib::{
  store::DocumentStore,
  transform::{
    Case,
    apply_text_transform,
  },
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

/// Upper- or lowercases every fully selected run on the current page.
pub struct ToCaseCommand {
  session: Rc<Session>,
  store:   Rc<dyn DocumentStore>,
}

impl Command for ToCaseCommand {
  const KIND: CommandKind = CommandKind::ToCase;

  fn construct(session: &Rc<Session>) -> Result<Self> {
    let store = session
      .store()
      .ok_or(CommandError::MissingResource("document store"))?;
    Ok(Self {
      session: session.clone(),
      store,
    })
  }

  fn upcast(command: Rc<Self>) -> Instance {
    Instance::ToCase(command)
  }

  fn downcast(instance: &Instance) -> Option<Rc<Self>> {
    match instance {
      Instance::ToCase(command) => Some(command.clone()),
      _ => None,
    }
  }
}

impl ToCaseCommand {
  /// Returns the number of runs rewritten. The page is written back even
  /// when that number is zero.
  pub fn execute(&self, upper: bool) -> Result<usize> {
    let case = Case::from_upper(upper);
    let target = self.session.logger().target();
    log::info!(target: target, "ToCase({case:?})");

    let count = logged(&self.session, "ToCase", || {
      let mut page = self.store.current_document()?;
      let count = apply_text_transform(&mut page, |text| case.apply(text))?;
      self.store.update_document(&page)?;
      Ok(count)
    })?;

    log::debug!(target: target, "rewrote {count} runs");
    self.session.invalidate_ribbon();
    Ok(count)
  }
}
