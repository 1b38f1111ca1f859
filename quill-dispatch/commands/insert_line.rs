use std::rc::Rc;

use quill_lib::{
  page::{
    has_body_selection,
    insert_paragraph_after_selection,
  },
  store::DocumentStore,
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
    ContextQuery,
    Instance,
  },
  session::Session,
};

/// Inserts a paragraph drawn as a line of box characters below the caret.
pub struct InsertLineCommand {
  session:     Rc<Session>,
  store:       Rc<dyn DocumentStore>,
  line_length: usize,
}

impl Command for InsertLineCommand {
  const KIND: CommandKind = CommandKind::InsertLine;

  fn construct(session: &Rc<Session>) -> Result<Self> {
    let store = session
      .store()
      .ok_or(CommandError::MissingResource("document store"))?;
    Ok(Self {
      session: session.clone(),
      store,
      line_length: session.config().settings.commands.line_length,
    })
  }

  fn upcast(command: Rc<Self>) -> Instance {
    Instance::InsertLine(command)
  }

  fn downcast(instance: &Instance) -> Option<Rc<Self>> {
    match instance {
      Instance::InsertLine(command) => Some(command.clone()),
      _ => None,
    }
  }
}

impl ContextQuery for InsertLineCommand {
  /// Whether the caret or selection is in body text rather than the title.
  fn query_context(&self) -> bool {
    logged(&self.session, "IsBodyContext", || {
      let page = self.store.current_document()?;
      Ok(has_body_selection(&page)?)
    })
    .unwrap_or(false)
  }
}

impl InsertLineCommand {
  pub fn line_length(&self) -> usize {
    self.line_length
  }

  /// Insert a line of `ch` after the paragraph holding the selection.
  ///
  /// Returns `false`, without writing, when nothing in the body is selected.
  pub fn execute(&self, ch: char) -> Result<bool> {
    let target = self.session.logger().target();
    log::info!(target: target, "InsertLine({ch:?})");

    let line: String = std::iter::repeat_n(ch, self.line_length).collect();
    let inserted = logged(&self.session, "InsertLine", || {
      let mut page = self.store.current_document()?;
      if !insert_paragraph_after_selection(&mut page, &line)? {
        return Ok(false);
      }
      self.store.update_document(&page)?;
      Ok(true)
    })?;

    if inserted {
      self.session.invalidate_ribbon();
    } else {
      log::debug!(target: target, "no body selection, nothing inserted");
    }
    Ok(inserted)
  }
}
