//! Access to the host's live page.

use std::cell::{
  Cell,
  RefCell,
};

use thiserror::Error;

use crate::markup::{
  Document,
  MarkupError,
};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("no active document")]
  NoActiveDocument,
  #[error("host rejected the update: {0}")]
  Rejected(String),
  #[error("host returned an unreadable page: {0}")]
  Markup(#[from] MarkupError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read-modify-write access to the page the user is looking at.
///
/// There is no concurrency check between a read and the following write; if
/// the host page changes in between, the later write wins.
pub trait DocumentStore {
  fn current_document(&self) -> Result<Document>;
  fn update_document(&self, doc: &Document) -> Result<()>;
}

/// A store holding the page as XML text.
#[derive(Debug, Default)]
pub struct MemoryStore {
  page:      RefCell<Option<String>>,
  read_only: Cell<bool>,
  reads:     Cell<usize>,
  writes:    Cell<usize>,
}

impl MemoryStore {
  pub fn new(xml: impl Into<String>) -> Self {
    Self {
      page: RefCell::new(Some(xml.into())),
      ..Self::default()
    }
  }

  /// A store with no page open.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn xml(&self) -> Option<String> {
    self.page.borrow().clone()
  }

  pub fn open(&self, xml: impl Into<String>) {
    *self.page.borrow_mut() = Some(xml.into());
  }

  pub fn close(&self) {
    self.page.borrow_mut().take();
  }

  /// Make every following update fail, as a host does for a locked page.
  pub fn set_read_only(&self, read_only: bool) {
    self.read_only.set(read_only);
  }

  pub fn reads(&self) -> usize {
    self.reads.get()
  }

  pub fn writes(&self) -> usize {
    self.writes.get()
  }
}

impl DocumentStore for MemoryStore {
  fn current_document(&self) -> Result<Document> {
    let page = self.page.borrow();
    let xml = page.as_deref().ok_or(StoreError::NoActiveDocument)?;
    self.reads.set(self.reads.get() + 1);
    Ok(Document::parse(xml)?)
  }

  fn update_document(&self, doc: &Document) -> Result<()> {
    if self.read_only.get() {
      return Err(StoreError::Rejected("page is read-only".into()));
    }

    let mut page = self.page.borrow_mut();
    if page.is_none() {
      return Err(StoreError::Rejected("page was closed".into()));
    }
    *page = Some(doc.to_xml());
    self.writes.set(self.writes.get() + 1);
    Ok(())
  }
}
