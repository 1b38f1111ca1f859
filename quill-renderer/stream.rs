use std::{
  io::{
    self,
    Cursor,
    Read,
    Seek,
    SeekFrom,
  },
  sync::Arc,
};

/// Encoded image bytes handed to the host, readable from the start.
///
/// Clones share the bytes but keep their own read position.
#[derive(Debug, Clone)]
pub struct ImageStream {
  cursor: Cursor<Arc<[u8]>>,
}

impl ImageStream {
  pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
    Self {
      cursor: Cursor::new(bytes.into()),
    }
  }

  pub fn bytes(&self) -> &[u8] {
    self.cursor.get_ref()
  }

  pub fn len(&self) -> usize {
    self.bytes().len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes().is_empty()
  }

  pub fn position(&self) -> u64 {
    self.cursor.position()
  }
}

impl Read for ImageStream {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    self.cursor.read(buf)
  }
}

impl Seek for ImageStream {
  fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
    self.cursor.seek(pos)
  }
}
