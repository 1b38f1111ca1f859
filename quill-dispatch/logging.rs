use env_logger::Env;

/// Initialize the global logger once.
///
/// `RUST_LOG` wins over `filter` when set. Later calls are ignored, so every
/// entry point can call this unconditionally.
pub fn init_logging(filter: &str) -> bool {
  env_logger::Builder::from_env(Env::default().default_filter_or(filter))
    .format_timestamp_millis()
    .try_init()
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_second_init_is_ignored() {
    init_logging("debug");
    assert!(!init_logging("trace"));
  }
}
