use quill_lib::{
  page::PageError,
  store::StoreError,
  transform::TransformError,
};
use quill_renderer::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
  /// The session lacks something the command needs to be built.
  #[error("session has no {0}")]
  MissingResource(&'static str),

  /// Construction already failed once for this session.
  #[error("{command} is unavailable: {reason}")]
  Unavailable {
    command: &'static str,
    reason:  String,
  },

  #[error("unknown control id: {0}")]
  UnknownControl(String),

  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Transform(#[from] TransformError),

  #[error(transparent)]
  Page(#[from] PageError),

  #[error(transparent)]
  Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, CommandError>;
