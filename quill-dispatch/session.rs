//! Resources shared by every command for the lifetime of the add-in.

use std::{
  cell::{
    Cell,
    RefCell,
  },
  fmt,
  rc::Rc,
};

use quill_config::Config;
use quill_lib::store::DocumentStore;
use quill_renderer::{
  GlyphonBackend,
  ImageStream,
  StyleCatalog,
  TextBackend,
};

/// Builds a fresh text backend for each tile render.
pub type TextBackendFactory = Rc<dyn Fn() -> Box<dyn TextBackend>>;

/// Image streams handed to the host, kept until shutdown.
#[derive(Debug, Default)]
pub struct Trash {
  streams: RefCell<Vec<ImageStream>>,
}

impl Trash {
  /// Track `stream` and hand it back for the host.
  pub fn track(&self, stream: ImageStream) -> ImageStream {
    self.streams.borrow_mut().push(stream.clone());
    stream
  }

  pub fn len(&self) -> usize {
    self.streams.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.streams.borrow().is_empty()
  }

  /// Release every tracked stream, returning how many there were.
  pub fn dispose(&self) -> usize {
    self.streams.borrow_mut().drain(..).count()
  }
}

/// Native handle of the host's main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Log target commands write under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
  target: String,
}

impl Logger {
  pub fn new(target: impl Into<String>) -> Self {
    Self {
      target: target.into(),
    }
  }

  pub fn target(&self) -> &str {
    &self.target
  }
}

/// Handle to the host ribbon, used to ask it to re-query control state.
#[derive(Default)]
pub struct RibbonRef {
  invalidations: Cell<usize>,
  on_invalidate: Option<Box<dyn Fn()>>,
}

impl RibbonRef {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_hook(hook: impl Fn() + 'static) -> Self {
    Self {
      invalidations: Cell::new(0),
      on_invalidate: Some(Box::new(hook)),
    }
  }

  pub fn invalidate(&self) {
    self.invalidations.set(self.invalidations.get() + 1);
    if let Some(hook) = &self.on_invalidate {
      hook();
    }
  }

  pub fn invalidations(&self) -> usize {
    self.invalidations.get()
  }
}

impl fmt::Debug for RibbonRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RibbonRef")
      .field("invalidations", &self.invalidations.get())
      .finish_non_exhaustive()
  }
}

pub struct Session {
  trash:        Trash,
  window:       Option<WindowHandle>,
  logger:       Logger,
  ribbon:       Option<RibbonRef>,
  store:        Option<Rc<dyn DocumentStore>>,
  catalog:      Option<Rc<dyn StyleCatalog>>,
  text_backend: TextBackendFactory,
  config:       Config,
  shut_down:    Cell<bool>,
}

impl Session {
  pub fn builder(config: Config) -> SessionBuilder {
    SessionBuilder::new(config)
  }

  pub fn trash(&self) -> &Trash {
    &self.trash
  }

  pub fn window(&self) -> Option<WindowHandle> {
    self.window
  }

  pub fn logger(&self) -> &Logger {
    &self.logger
  }

  pub fn ribbon(&self) -> Option<&RibbonRef> {
    self.ribbon.as_ref()
  }

  pub fn store(&self) -> Option<Rc<dyn DocumentStore>> {
    self.store.clone()
  }

  pub fn catalog(&self) -> Option<Rc<dyn StyleCatalog>> {
    self.catalog.clone()
  }

  pub fn text_backend(&self) -> Box<dyn TextBackend> {
    (self.text_backend)()
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Ask the host ribbon to refresh, if there is one.
  pub fn invalidate_ribbon(&self) {
    if let Some(ribbon) = &self.ribbon {
      ribbon.invalidate();
    }
  }

  /// Release everything handed to the host. Safe to call more than once.
  pub fn shutdown(&self) -> usize {
    if self.shut_down.replace(true) {
      return 0;
    }

    let count = self.trash.len();
    log::info!(target: self.logger.target(), "Disposing {count} streams");
    self.trash.dispose()
  }

  pub fn is_shut_down(&self) -> bool {
    self.shut_down.get()
  }
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Session")
      .field("trash", &self.trash.len())
      .field("window", &self.window)
      .field("logger", &self.logger)
      .field("ribbon", &self.ribbon)
      .field("store", &self.store.is_some())
      .field("catalog", &self.catalog.is_some())
      .field("shut_down", &self.shut_down.get())
      .finish_non_exhaustive()
  }
}

pub struct SessionBuilder {
  window:       Option<WindowHandle>,
  logger:       Logger,
  ribbon:       Option<RibbonRef>,
  store:        Option<Rc<dyn DocumentStore>>,
  catalog:      Option<Rc<dyn StyleCatalog>>,
  text_backend: TextBackendFactory,
  config:       Config,
}

impl SessionBuilder {
  /// Starts with the config's log target and style sheet, and a
  /// [`GlyphonBackend`] over the system fonts.
  pub fn new(config: Config) -> Self {
    let catalog: Rc<dyn StyleCatalog> = Rc::new(config.styles.clone());
    Self {
      window: None,
      logger: Logger::new(config.settings.log.target.as_str()),
      ribbon: None,
      store: None,
      catalog: Some(catalog),
      text_backend: Rc::new(|| Box::new(GlyphonBackend::new()) as Box<dyn TextBackend>),
      config,
    }
  }

  pub fn window(mut self, window: WindowHandle) -> Self {
    self.window = Some(window);
    self
  }

  pub fn logger(mut self, logger: Logger) -> Self {
    self.logger = logger;
    self
  }

  pub fn ribbon(mut self, ribbon: RibbonRef) -> Self {
    self.ribbon = Some(ribbon);
    self
  }

  pub fn store(mut self, store: Rc<dyn DocumentStore>) -> Self {
    self.store = Some(store);
    self
  }

  pub fn catalog(mut self, catalog: Option<Rc<dyn StyleCatalog>>) -> Self {
    self.catalog = catalog;
    self
  }

  pub fn text_backend<F>(mut self, factory: F) -> Self
  where
    F: Fn() -> Box<dyn TextBackend> + 'static,
  {
    self.text_backend = Rc::new(factory);
    self
  }

  pub fn build(self) -> Rc<Session> {
    Rc::new(Session {
      trash:        Trash::default(),
      window:       self.window,
      logger:       self.logger,
      ribbon:       self.ribbon,
      store:        self.store,
      catalog:      self.catalog,
      text_backend: self.text_backend,
      config:       self.config,
      shut_down:    Cell::new(false),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn session() -> Rc<Session> {
    Session::builder(Config::builtin().unwrap()).build()
  }

  #[test]
  fn test_trash_tracks_and_disposes() {
    let trash = Trash::default();
    let stream = trash.track(ImageStream::new(vec![1, 2, 3]));
    assert_eq!(stream.len(), 3);
    trash.track(ImageStream::new(vec![4]));

    assert_eq!(trash.len(), 2);
    assert_eq!(trash.dispose(), 2);
    assert!(trash.is_empty());
  }

  #[test]
  fn test_shutdown_is_idempotent() {
    let session = session();
    session.trash().track(ImageStream::new(vec![0]));
    session.trash().track(ImageStream::new(vec![1]));

    assert_eq!(session.shutdown(), 2);
    assert!(session.is_shut_down());
    assert_eq!(session.shutdown(), 0);
  }

  #[test]
  fn test_ribbon_hook_runs_on_invalidate() {
    let hits = Rc::new(Cell::new(0));
    let seen = hits.clone();
    let ribbon = RibbonRef::with_hook(move || seen.set(seen.get() + 1));

    let session = Session::builder(Config::builtin().unwrap())
      .ribbon(ribbon)
      .window(WindowHandle(0x1F00))
      .build();
    session.invalidate_ribbon();
    session.invalidate_ribbon();

    assert_eq!(hits.get(), 2);
    assert_eq!(session.ribbon().map(RibbonRef::invalidations), Some(2));
    assert_eq!(session.window(), Some(WindowHandle(0x1F00)));
  }

  #[test]
  fn test_defaults_come_from_config() {
    let session = session();
    assert_eq!(session.logger().target(), "quill");
    assert!(session.store().is_none());
    assert_eq!(session.catalog().map(|catalog| catalog.count()), Some(8));
  }
}
