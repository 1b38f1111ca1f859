use std::{
  fs,
  io::Read,
};

use quill_config::{
  Config,
  ConfigError,
};
use quill_renderer::{
  Color,
  FontStyle,
  StyleCatalog,
};

fn icon_png() -> Vec<u8> {
  let mut pixmap = tiny_skia::Pixmap::new(32, 32).unwrap();
  pixmap.fill(tiny_skia::Color::from_rgba8(200, 30, 30, 255));
  pixmap.encode_png().unwrap()
}

#[test]
fn test_load_config_with_icons() {
  let dir = tempfile::tempdir().unwrap();
  fs::create_dir(dir.path().join("icons")).unwrap();
  fs::write(dir.path().join("icons/logo.png"), icon_png()).unwrap();
  fs::write(dir.path().join("icons/double.png"), icon_png()).unwrap();

  let path = dir.path().join("quill.toml");
  fs::write(
    &path,
    r##"
[log]
filter = "debug"

[tile]
dpi_y = 120.0

[[styles]]
name       = "Warning"
font       = "Segoe UI"
size       = 10.0
font_style = [ "bold", "strikethrough" ]
color      = "#C00000"
background = "transparent"

[icons]
Logo       = "icons/logo.png"
DoubleLine = "icons/double.png"
"##,
  )
  .unwrap();

  let config = Config::load(&path).unwrap();
  assert_eq!(config.settings.log.filter, "debug");
  assert_eq!(config.settings.tile.options().dpi_y, 120.0);

  let last = config.styles.count() - 1;
  let warning = config.styles.style(last).unwrap();
  assert_eq!(warning.name, "Warning");
  assert_eq!(warning.font_style, FontStyle::BOLD | FontStyle::STRIKETHROUGH);
  assert_eq!(warning.foreground, Color::from_hex(0xC00000));
  assert_eq!(warning.fill(), None);

  let mut logo = config.resources.icon("Logo").unwrap();
  let mut bytes = Vec::new();
  logo.read_to_end(&mut bytes).unwrap();
  assert_eq!(bytes, icon_png());
  assert!(config.resources.icon("DoubleLine").is_some());
}

#[test]
fn test_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  assert!(matches!(
    Config::load(dir.path().join("absent.toml")),
    Err(ConfigError::Io { .. })
  ));
}

#[test]
fn test_broken_icon_fails_the_load() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("logo.png"), b"not a png").unwrap();
  let path = dir.path().join("quill.toml");
  fs::write(&path, "[icons]\nLogo = \"logo.png\"\n").unwrap();

  match Config::load(&path) {
    Err(ConfigError::InvalidIcon { name, .. }) => assert_eq!(name, "Logo"),
    other => panic!("expected an icon error, got {other:?}"),
  }
}

#[test]
fn test_malformed_toml() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("quill.toml");
  fs::write(&path, "[tile\ndpi_y = 96").unwrap();
  assert!(matches!(Config::load(&path), Err(ConfigError::Toml(_))));
}
