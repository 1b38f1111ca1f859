use quill_renderer::TileOptions;
use serde::Deserialize;

use crate::error::{
  ConfigError,
  Result,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
  /// `env_logger` filter directive, e.g. `"info"` or `"quill_dispatch=debug"`.
  pub filter: String,
  /// Target name commands log under.
  pub target: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      filter: "info".into(),
      target: "quill".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileConfig {
  pub dpi_y:        f32,
  pub label_family: String,
}

impl Default for TileConfig {
  fn default() -> Self {
    let options = TileOptions::default();
    Self {
      dpi_y:        options.dpi_y,
      label_family: options.label_family,
    }
  }
}

impl TileConfig {
  pub fn options(&self) -> TileOptions {
    TileOptions {
      dpi_y:        self.dpi_y,
      label_family: self.label_family.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
  /// Characters in an inserted horizontal line.
  pub line_length: usize,
}

impl Default for CommandConfig {
  fn default() -> Self {
    Self { line_length: 100 }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub log:      LogConfig,
  pub tile:     TileConfig,
  pub commands: CommandConfig,
}

impl Settings {
  pub(crate) fn validate(&self) -> Result<()> {
    if !(self.tile.dpi_y > 0.0) {
      return Err(ConfigError::InvalidDpi(self.tile.dpi_y));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_sections_use_defaults() {
    let settings: Settings = toml::from_str("[tile]\ndpi_y = 120.0").unwrap();
    assert_eq!(settings.tile.dpi_y, 120.0);
    assert_eq!(settings.tile.label_family, "Tahoma");
    assert_eq!(settings.commands.line_length, 100);
    assert_eq!(settings.log, LogConfig::default());
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    assert!(toml::from_str::<Settings>("[tile]\ndpi = 120.0").is_err());
  }

  #[test]
  fn test_dpi_must_be_positive() {
    let mut settings = Settings::default();
    settings.tile.dpi_y = 0.0;
    assert!(matches!(settings.validate(), Err(ConfigError::InvalidDpi(_))));

    settings.tile.dpi_y = f32::NAN;
    assert!(settings.validate().is_err());
  }

  #[test]
  fn test_tile_options() {
    let tile = TileConfig {
      dpi_y:        144.0,
      label_family: "Segoe UI".into(),
    };
    let options = tile.options();
    assert_eq!(options.dpi_y, 144.0);
    assert_eq!(options.label_family, "Segoe UI");
  }
}
