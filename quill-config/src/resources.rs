//! Ribbon strings and icons.

use std::{
  collections::HashMap,
  path::{
    Path,
    PathBuf,
  },
  sync::Arc,
};

use quill_renderer::{
  ImageStream,
  image::decode_icon,
};

use crate::error::{
  ConfigError,
  Result,
};

pub const LABEL_SUFFIX: &str = "_Label";
pub const SCREENTIP_SUFFIX: &str = "_Screentip";

/// Resource id of a control's label, e.g. `ToUppercaseButton_Label`.
pub fn label_id(control_id: &str) -> String {
  format!("{control_id}{LABEL_SUFFIX}")
}

/// Resource id of a control's screentip.
pub fn screentip_id(control_id: &str) -> String {
  format!("{control_id}{SCREENTIP_SUFFIX}")
}

/// Strings keyed by resource id and validated icon images keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Resources {
  strings: HashMap<String, String>,
  icons:   HashMap<String, Arc<[u8]>>,
}

impl Resources {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn from_tables(
    labels: HashMap<String, String>,
    screentips: HashMap<String, String>,
  ) -> Self {
    let strings = labels
      .into_iter()
      .map(|(id, text)| (label_id(&id), text))
      .chain(
        screentips
          .into_iter()
          .map(|(id, text)| (screentip_id(&id), text)),
      )
      .collect();

    Self {
      strings,
      icons: HashMap::new(),
    }
  }

  pub fn string(&self, res_id: &str) -> Option<&str> {
    self.strings.get(res_id).map(String::as_str)
  }

  pub fn set_string(&mut self, res_id: impl Into<String>, text: impl Into<String>) {
    self.strings.insert(res_id.into(), text.into());
  }

  /// A fresh stream over the named icon, positioned at the start.
  pub fn icon(&self, name: &str) -> Option<ImageStream> {
    self.icons.get(name).cloned().map(ImageStream::new)
  }

  pub fn icon_names(&self) -> impl Iterator<Item = &str> {
    self.icons.keys().map(String::as_str)
  }

  /// Register icon bytes after checking they decode.
  pub fn add_icon(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> bool {
    if decode_icon(&bytes).is_none() {
      return false;
    }
    self.icons.insert(name.into(), bytes.into());
    true
  }

  /// Read and validate an icon file; relative paths resolve against `base`.
  pub fn load_icon(&mut self, name: &str, path: &Path, base: &Path) -> Result<()> {
    let path: PathBuf = if path.is_relative() {
      base.join(path)
    } else {
      path.to_path_buf()
    };

    let bytes = std::fs::read(&path).map_err(|source| {
      ConfigError::Io {
        path: path.clone(),
        source,
      }
    })?;

    if !self.add_icon(name, bytes) {
      return Err(ConfigError::InvalidIcon {
        name: name.to_string(),
        path,
      });
    }
    log::debug!("loaded icon {name} from {}", path.display());
    Ok(())
  }
}
