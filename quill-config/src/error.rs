use std::{
  io,
  path::PathBuf,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("style {style:?} has an invalid color {value:?}")]
  InvalidColor { style: String, value: String },

  #[error("style {style:?} has an unknown font style {value:?}")]
  InvalidFontStyle { style: String, value: String },

  #[error("style {style:?} has a non-positive size {size}")]
  InvalidSize { style: String, size: f32 },

  #[error("style {0:?} is defined more than once")]
  DuplicateStyle(String),

  #[error("dpi_y must be positive, got {0}")]
  InvalidDpi(f32),

  #[error("icon {name:?} at {path} is not a usable image")]
  InvalidIcon { name: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
