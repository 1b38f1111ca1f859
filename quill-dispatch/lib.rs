//! Ribbon commands for a hosted notebook page
//!
//! A [`Ribbon`] receives host callbacks and routes them through a
//! [`CommandRegistry`], which builds each command once from the shared
//! [`Session`] and hands the same instance back afterwards.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use quill_config::Config;
//! use quill_dispatch::{Outcome, Ribbon, Session};
//! use quill_lib::store::MemoryStore;
//!
//! let store = Rc::new(MemoryStore::new(
//!   r#"<one:Page xmlns:one="urn:notes"><one:OE><one:T selected="all"><![CDATA[hi]]></one:T></one:OE></one:Page>"#,
//! ));
//! let session = Session::builder(Config::builtin()?).store(store.clone()).build();
//! let ribbon = Ribbon::new(session);
//!
//! assert_eq!(ribbon.invoke("ToUppercaseCmd")?, Outcome::Transformed(1));
//! assert!(store.xml().unwrap().contains("<![CDATA[HI]]>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod commands;
pub mod error;
pub mod logging;
pub mod registry;
pub mod ribbon;
pub mod session;

pub use commands::{
  ApplyStyleCommand,
  GalleryTileCommand,
  InsertLineCommand,
  ToCaseCommand,
};
pub use error::{
  CommandError,
  Result,
};
pub use logging::init_logging;
pub use registry::{
  Command,
  CommandKind,
  CommandRegistry,
  ContextQuery,
  Instance,
};
pub use ribbon::{
  Action,
  Outcome,
  Ribbon,
};
pub use session::{
  Logger,
  RibbonRef,
  Session,
  SessionBuilder,
  TextBackendFactory,
  Trash,
  WindowHandle,
};
