//! Settings, gallery styles and ribbon resources.
//!
//! Configuration is a single TOML file merged over the built-in
//! `default.toml`:
//!
//! ```toml
//! [log]
//! filter = "quill_dispatch=debug"
//!
//! [tile]
//! dpi_y = 144.0
//!
//! [[styles]]
//! name = "Code"
//! font = "Cascadia Mono"
//!
//! [icons]
//! Logo = "icons/logo.png"
//! ```
//!
//! Icon paths are relative to the directory holding the config file.

mod error;
mod merge;
pub mod resources;
pub mod settings;
pub mod styles;

use std::{
  collections::HashMap,
  path::{
    Path,
    PathBuf,
  },
};

pub use error::{
  ConfigError,
  Result,
};
pub use merge::merge_values;
pub use resources::Resources;
use serde::Deserialize;
pub use settings::{
  CommandConfig,
  LogConfig,
  Settings,
  TileConfig,
};
pub use styles::StyleSheet;
use toml::Value;

use crate::styles::StyleRaw;

/// Depth down to which user values merge into the built-in ones:
/// sections, then the style list, then a single style's fields.
const MERGE_DEPTH: usize = 3;

const DEFAULT_CONFIG: &str = include_str!("../default.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigRaw {
  #[serde(default)]
  log:        LogConfig,
  #[serde(default)]
  tile:       TileConfig,
  #[serde(default)]
  commands:   CommandConfig,
  #[serde(default)]
  styles:     Vec<StyleRaw>,
  #[serde(default)]
  labels:     HashMap<String, String>,
  #[serde(default)]
  screentips: HashMap<String, String>,
  #[serde(default)]
  icons:      HashMap<String, PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
  pub settings:  Settings,
  pub styles:    StyleSheet,
  pub resources: Resources,
}

impl Config {
  /// The built-in configuration.
  pub fn builtin() -> Result<Self> {
    Self::from_value(default_value()?, Path::new("."))
  }

  /// Load `path` merged over the built-in configuration.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| {
      ConfigError::Io {
        path: path.to_path_buf(),
        source,
      }
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let config = Self::from_toml_str(&text, base)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
  }

  /// Parse `text` merged over the built-in configuration, resolving icon
  /// paths against `base`.
  pub fn from_toml_str(text: &str, base: &Path) -> Result<Self> {
    let user: Value = toml::from_str(text)?;
    let merged = merge_values(default_value()?, user, MERGE_DEPTH);
    Self::from_value(merged, base)
  }

  fn from_value(value: Value, base: &Path) -> Result<Self> {
    let raw: ConfigRaw = value.try_into()?;

    let settings = Settings {
      log:      raw.log,
      tile:     raw.tile,
      commands: raw.commands,
    };
    settings.validate()?;

    let styles = StyleSheet::from_raw(raw.styles)?;

    let mut resources = Resources::from_tables(raw.labels, raw.screentips);
    let mut icons: Vec<_> = raw.icons.into_iter().collect();
    icons.sort();
    for (name, path) in icons {
      resources.load_icon(&name, &path, base)?;
    }

    Ok(Self {
      settings,
      styles,
      resources,
    })
  }
}

fn default_value() -> Result<Value> {
  Ok(toml::from_str(DEFAULT_CONFIG)?)
}
